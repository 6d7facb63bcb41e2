use clap::{Parser, Subcommand};
use fitplan_core::archive::{list_plans, DEFAULT_PLAN_TITLE};
use fitplan_core::*;
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fitplan")]
#[command(about = "Section and mine AI-generated fitness plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split plan markdown into intro, days and tips (JSON)
    Parse {
        /// Plan markdown file ("-" or omitted for stdin)
        file: Option<PathBuf>,

        /// Print a short human-readable summary instead of JSON
        #[arg(long)]
        summary: bool,
    },

    /// Extract workout and meal names per day (JSON)
    Items {
        file: Option<PathBuf>,

        /// Only this day (1-based position in the plan)
        #[arg(long)]
        day: Option<usize>,
    },

    /// Build one image-generation request per extracted item (JSON)
    Images {
        file: Option<PathBuf>,

        #[arg(long)]
        day: Option<usize>,
    },

    /// Print a day as plain text suitable for reading aloud
    Speak {
        file: Option<PathBuf>,

        #[arg(long)]
        day: usize,
    },

    /// Build the plan-generation prompt for a profile
    Prompt {
        /// Profile file (.toml, otherwise JSON)
        #[arg(long)]
        profile: PathBuf,

        /// Print the full request body as JSON instead of the prompt text
        #[arg(long)]
        request: bool,
    },

    /// Save a plan to the local archive
    Save {
        file: Option<PathBuf>,

        #[arg(long)]
        title: Option<String>,
    },

    /// List saved plans, newest first
    List,
}

/// Items for one day, as printed by `items`
#[derive(Serialize)]
struct DayItems<'a> {
    title: &'a str,
    #[serde(flatten)]
    details: DayDetails,
}

#[derive(Serialize)]
struct DayImageRequests<'a> {
    title: &'a str,
    requests: Vec<ItemImageRequest>,
}

fn main() -> Result<()> {
    // Initialize logging
    fitplan_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Commands::Parse { file, summary } => cmd_parse(file.as_deref(), summary),
        Commands::Items { file, day } => cmd_items(file.as_deref(), day),
        Commands::Images { file, day } => cmd_images(file.as_deref(), day, &config),
        Commands::Speak { file, day } => cmd_speak(file.as_deref(), day),
        Commands::Prompt { profile, request } => cmd_prompt(&profile, request, &config),
        Commands::Save { file, title } => cmd_save(file.as_deref(), title, &data_dir),
        Commands::List => cmd_list(&data_dir),
    }
}

fn cmd_parse(file: Option<&Path>, summary: bool) -> Result<()> {
    let plan = parse_plan_markdown(&read_input(file)?);

    if summary {
        display_summary(&plan);
        Ok(())
    } else {
        print_json(&plan)
    }
}

fn cmd_items(file: Option<&Path>, day: Option<usize>) -> Result<()> {
    let plan = parse_plan_markdown(&read_input(file)?);

    let items: Vec<DayItems> = select_days(&plan, day)?
        .into_iter()
        .map(|d| DayItems {
            title: &d.title,
            details: extract_items_from_markdown(&d.content),
        })
        .collect();

    print_json(&items)
}

fn cmd_images(file: Option<&Path>, day: Option<usize>, config: &Config) -> Result<()> {
    let plan = parse_plan_markdown(&read_input(file)?);

    let batches: Vec<DayImageRequests> = select_days(&plan, day)?
        .into_iter()
        .map(|d| {
            let details = extract_items_from_markdown(&d.content);
            DayImageRequests {
                title: &d.title,
                requests: image_requests_for_day(d, &details, &config.images),
            }
        })
        .collect();

    print_json(&batches)
}

fn cmd_speak(file: Option<&Path>, day: usize) -> Result<()> {
    let plan = parse_plan_markdown(&read_input(file)?);
    let section = select_days(&plan, Some(day))?[0];

    println!("{}", day_speech_text(&section.title, &section.content));
    Ok(())
}

fn cmd_prompt(profile_path: &Path, request: bool, config: &Config) -> Result<()> {
    let profile = UserProfile::load(profile_path)?;
    profile.ensure_valid()?;

    let prompt = build_plan_prompt(&profile);
    if request {
        print_json(&PlanRequest::new(prompt, &config.generation))
    } else {
        print!("{}", prompt);
        Ok(())
    }
}

fn cmd_save(file: Option<&Path>, title: Option<String>, data_dir: &Path) -> Result<()> {
    let markdown = read_input(file)?;
    let title = title.unwrap_or_else(|| DEFAULT_PLAN_TITLE.to_string());
    let plan = SavedPlan::from_markdown(title, markdown);

    if plan.plan_json.is_degenerate() {
        tracing::warn!("Saving a plan with no recognised day sections");
    }

    let mut store = JsonlPlanStore::new(archive_path(data_dir));
    store.append(&plan)?;

    println!("✓ Saved plan {}", plan.id);
    println!("  Title: {}", plan.title);
    println!("  Days: {}", plan.plan_json.days.len());
    Ok(())
}

fn cmd_list(data_dir: &Path) -> Result<()> {
    let plans = list_plans(&archive_path(data_dir))?;

    if plans.is_empty() {
        println!("No saved plans.");
        return Ok(());
    }

    for plan in plans {
        println!(
            "{}  {}  {} ({} days)",
            plan.id,
            plan.created_at.format("%Y-%m-%d %H:%M"),
            plan.title,
            plan.plan_json.days.len()
        );
    }
    Ok(())
}

fn archive_path(data_dir: &Path) -> PathBuf {
    data_dir.join("plans.jsonl")
}

/// Read the whole file, or stdin when no file (or "-") is given
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn select_days(plan: &ParsedPlan, day: Option<usize>) -> Result<Vec<&DaySection>> {
    match day {
        None => Ok(plan.days.iter().collect()),
        Some(n) => plan.day(n).map(|d| vec![d]).ok_or_else(|| {
            Error::Other(format!(
                "Day {} not found: plan has {} days",
                n,
                plan.days.len()
            ))
        }),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn display_summary(plan: &ParsedPlan) {
    let intro_lines = plan.intro.lines().filter(|l| !l.trim().is_empty()).count();

    println!("Intro: {} lines", intro_lines);
    println!("Days: {}", plan.days.len());
    for (i, day) in plan.days.iter().enumerate() {
        println!("  {}. {}", i + 1, day.title);
    }
    if plan.tips_and_success.is_empty() {
        println!("Tips: none");
    } else {
        println!("Tips: {} lines", plan.tips_and_success.lines().count());
    }
}
