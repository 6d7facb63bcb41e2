//! Plan sectioner: splits generated plan markdown into intro, days and tips.
//!
//! The sectioner is a single forward pass over the document's lines with a
//! three-state mode:
//! - `Intro` until the first day heading or the tips heading
//! - `Day` while a `### Day N: ...` section is open
//! - `Tips` from `## Key Considerations & Tips for Your Journey` to the end
//!
//! Input that lacks the expected headings degrades to an all-intro plan.

use crate::{DaySection, ParsedPlan};
use once_cell::sync::Lazy;
use regex::Regex;

/// `### Day 1: Full Body Strength A`
static RE_DAY_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^###\s*Day\s+([0-9]+)\s*:(.*)$").unwrap());

/// The fixed heading that opens the tips section
static RE_TIPS_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^##\s*Key Considerations\s*&\s*Tips for Your Journey\s*$").unwrap()
});

/// Heading text the tips section must carry to be recognised
pub const TIPS_HEADING: &str = "## Key Considerations & Tips for Your Journey";

enum Mode<'a> {
    Intro,
    Day { title: String, lines: Vec<&'a str> },
    Tips,
}

struct Sectioner<'a> {
    mode: Mode<'a>,
    intro: Vec<&'a str>,
    days: Vec<DaySection>,
    tips: Vec<&'a str>,
}

impl<'a> Sectioner<'a> {
    fn new() -> Self {
        Self {
            mode: Mode::Intro,
            intro: Vec::new(),
            days: Vec::new(),
            tips: Vec::new(),
        }
    }

    fn feed(&mut self, line: &'a str) {
        let trimmed = line.trim();

        // Tips heading wins from any mode and is kept in the tips text
        if RE_TIPS_HEADING.is_match(trimmed) {
            self.close_day();
            self.mode = Mode::Tips;
            self.tips.push(line);
            return;
        }

        if !matches!(self.mode, Mode::Tips) {
            if let Some(title) = day_heading_title(trimmed) {
                self.close_day();
                self.mode = Mode::Day {
                    title,
                    lines: Vec::new(),
                };
                return;
            }
        }

        match &mut self.mode {
            Mode::Intro => self.intro.push(line),
            Mode::Day { lines, .. } => lines.push(line),
            Mode::Tips => self.tips.push(line),
        }
    }

    fn close_day(&mut self) {
        if let Mode::Day { title, lines } = std::mem::replace(&mut self.mode, Mode::Intro) {
            self.days.push(DaySection {
                title,
                content: join_trimmed(&lines),
            });
        }
    }

    fn finish(mut self) -> ParsedPlan {
        self.close_day();
        ParsedPlan {
            intro: join_trimmed(&self.intro),
            days: self.days,
            tips_and_success: join_trimmed(&self.tips),
        }
    }
}

/// Build the display title for a day heading, or None if the line isn't one.
///
/// The day number is kept as written ("Day 01" stays "Day 01").
fn day_heading_title(trimmed: &str) -> Option<String> {
    let caps = RE_DAY_HEADING.captures(trimmed)?;
    let number = &caps[1];
    let rest = caps[2].trim();

    Some(if rest.is_empty() {
        format!("Day {}", number)
    } else {
        format!("Day {}: {}", number, rest)
    })
}

fn join_trimmed(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

/// Split plan markdown into intro, per-day sections and tips.
///
/// Never fails: a document with no recognised headings comes back as
/// `{ intro: <whole text>, days: [], tips_and_success: "" }`.
pub fn parse_plan_markdown(plan: &str) -> ParsedPlan {
    let mut sectioner = Sectioner::new();
    for line in plan.split('\n') {
        sectioner.feed(line.strip_suffix('\r').unwrap_or(line));
    }
    let parsed = sectioner.finish();

    tracing::debug!(
        "Sectioned plan: {} days, intro {} bytes, tips {} bytes",
        parsed.days.len(),
        parsed.intro.len(),
        parsed.tips_and_success.len()
    );

    parsed
}
