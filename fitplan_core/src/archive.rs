//! Saved plan archive.
//!
//! Plans are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access. Unreadable lines are skipped with a
//! warning rather than failing the whole read.

use crate::{parse_plan_markdown, Error, ParsedPlan, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Title used when the caller doesn't supply one
pub const DEFAULT_PLAN_TITLE: &str = "My 7-day Fitness Plan";

/// A generated plan as stored, with its sectioned form alongside the markdown
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SavedPlan {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub plan_markdown: String,
    pub plan_json: ParsedPlan,
    pub intro: String,
    pub tips: String,
}

impl SavedPlan {
    /// Section the markdown and wrap it in a new record
    pub fn from_markdown(title: impl Into<String>, markdown: impl Into<String>) -> Self {
        let plan_markdown = markdown.into();
        let plan_json = parse_plan_markdown(&plan_markdown);

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: title.into(),
            intro: plan_json.intro.clone(),
            tips: plan_json.tips_and_success.clone(),
            plan_markdown,
            plan_json,
        }
    }
}

/// Plan store trait for persisting saved plans
pub trait PlanStore {
    fn append(&mut self, plan: &SavedPlan) -> Result<()>;
}

/// JSONL-based plan store with file locking
pub struct JsonlPlanStore {
    path: PathBuf,
}

impl JsonlPlanStore {
    /// Create a new JSONL store for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

/// `fs2` lock on the archive file, released on drop
struct ArchiveLock<'a> {
    file: &'a File,
}

impl<'a> ArchiveLock<'a> {
    fn exclusive(file: &'a File) -> Result<Self> {
        file.lock_exclusive()?;
        Ok(Self { file })
    }

    fn shared(file: &'a File) -> Result<Self> {
        file.lock_shared()?;
        Ok(Self { file })
    }
}

impl Drop for ArchiveLock<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to release archive lock: {}", e);
        }
    }
}

/// One archive record: the plan as compact JSON plus a trailing newline
fn encode_record(plan: &SavedPlan) -> Result<Vec<u8>> {
    let mut record = serde_json::to_vec(plan)?;
    record.push(b'\n');
    Ok(record)
}

/// Decode every record in archive contents, skipping the unreadable ones.
///
/// Returns the plans in file order and the 1-based line numbers skipped.
fn decode_records(contents: &str) -> (Vec<SavedPlan>, Vec<usize>) {
    let mut plans = Vec::new();
    let mut skipped = Vec::new();

    for (index, record) in contents.lines().enumerate() {
        if record.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<SavedPlan>(record) {
            Ok(plan) => plans.push(plan),
            Err(e) => {
                tracing::warn!("Skipping saved plan at line {}: {}", index + 1, e);
                skipped.push(index + 1);
            }
        }
    }

    (plans, skipped)
}

impl PlanStore for JsonlPlanStore {
    fn append(&mut self, plan: &SavedPlan) -> Result<()> {
        if plan.title.trim().is_empty() {
            return Err(Error::Archive("plan title must not be empty".into()));
        }

        let record = encode_record(plan)?;
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // one write per record
        let _lock = ArchiveLock::exclusive(&file)?;
        (&file).write_all(&record)?;
        (&file).sync_data()?;

        tracing::debug!("Archived plan {} ({}) in {:?}", plan.id, plan.title, self.path);
        Ok(())
    }
}

/// Read all saved plans from an archive file, in file order
pub fn read_plans(path: &Path) -> Result<Vec<SavedPlan>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let mut contents = String::new();
    {
        let _lock = ArchiveLock::shared(&file)?;
        (&file).read_to_string(&mut contents)?;
    }

    let (plans, skipped) = decode_records(&contents);
    tracing::debug!(
        "Read {} plans from {:?} ({} skipped)",
        plans.len(),
        path,
        skipped.len()
    );
    Ok(plans)
}

/// Saved plans sorted by creation time, newest first
pub fn list_plans(path: &Path) -> Result<Vec<SavedPlan>> {
    let mut plans = read_plans(path)?;
    plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(plans)
}

/// Look up a saved plan by id
pub fn find_plan(path: &Path, id: Uuid) -> Result<Option<SavedPlan>> {
    Ok(read_plans(path)?.into_iter().find(|p| p.id == id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const PLAN: &str = "Intro text\n### Day 1: Legs\n- Squats: 3x10\n## Key Considerations & Tips for Your Journey\n- Rest";

    #[test]
    fn test_from_markdown_fills_sections() {
        let plan = SavedPlan::from_markdown(DEFAULT_PLAN_TITLE, PLAN);
        assert_eq!(plan.intro, "Intro text");
        assert_eq!(plan.plan_json.days.len(), 1);
        assert!(plan.tips.ends_with("- Rest"));
        assert_eq!(plan.plan_markdown, PLAN);
    }

    #[test]
    fn test_append_and_read_single_plan() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plans.jsonl");

        let plan = SavedPlan::from_markdown("Week 1", PLAN);
        let id = plan.id;

        let mut store = JsonlPlanStore::new(&path);
        store.append(&plan).unwrap();

        let plans = read_plans(&path).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, id);
        assert_eq!(plans[0].plan_json, plan.plan_json);
        assert_eq!(find_plan(&path, id).unwrap().unwrap().title, "Week 1");
    }

    #[test]
    fn test_list_newest_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("archive").join("plans.jsonl");
        let mut store = JsonlPlanStore::new(&path);

        let mut old = SavedPlan::from_markdown("old", PLAN);
        old.created_at = Utc::now() - Duration::days(3);
        let new = SavedPlan::from_markdown("new", PLAN);

        store.append(&old).unwrap();
        store.append(&new).unwrap();

        let plans = list_plans(&path).unwrap();
        assert_eq!(plans[0].title, "new");
        assert_eq!(plans[1].title, "old");
    }

    #[test]
    fn test_corrupt_lines_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plans.jsonl");

        let mut store = JsonlPlanStore::new(&path);
        store.append(&SavedPlan::from_markdown("good", PLAN)).unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{ not json").unwrap();

        let plans = read_plans(&path).unwrap();
        assert_eq!(plans.len(), 1);
    }

    #[test]
    fn test_decode_records_reports_skipped_lines() {
        let good = SavedPlan::from_markdown("good", PLAN);
        let record = String::from_utf8(encode_record(&good).unwrap()).unwrap();
        assert!(record.ends_with('\n'));

        let contents = format!("\n{}{{ not json\n   \n{}", record, record);
        let (plans, skipped) = decode_records(&contents);

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0], good);
        assert_eq!(skipped, vec![3]);
    }

    #[test]
    fn test_empty_title_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = JsonlPlanStore::new(temp_dir.path().join("plans.jsonl"));

        let result = store.append(&SavedPlan::from_markdown("  ", PLAN));
        assert!(matches!(result, Err(Error::Archive(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_read_missing_archive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let plans = read_plans(&temp_dir.path().join("nonexistent.jsonl")).unwrap();
        assert!(plans.is_empty());
    }
}
