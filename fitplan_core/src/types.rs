//! Core domain types for the fitness plan pipeline.
//!
//! This module defines the structures produced from a generated plan:
//! - The sectioned plan (intro, days, tips)
//! - Per-day extracted items used as image prompt seeds

use serde::{Deserialize, Serialize};

// ============================================================================
// Sectioned Plan
// ============================================================================

/// One day of the plan, demarcated by a `### Day N:` heading.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySection {
    /// `"Day {N}: {rest}"`, or `"Day {N}"` when the heading has no text after the colon
    pub title: String,
    /// Everything between this heading and the next day or tips heading, trimmed
    pub content: String,
}

/// A plan document split into its three regions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPlan {
    pub intro: String,
    pub days: Vec<DaySection>,
    /// Starts with the tips heading line itself when present
    pub tips_and_success: String,
}

impl ParsedPlan {
    /// True when no day headings were recognised
    pub fn is_degenerate(&self) -> bool {
        self.days.is_empty()
    }

    /// Look up a day by its 1-based position in the document
    pub fn day(&self, position: usize) -> Option<&DaySection> {
        position.checked_sub(1).and_then(|i| self.days.get(i))
    }
}

// ============================================================================
// Extracted Items
// ============================================================================

/// Kind of item mined from a day's text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Workout,
    Meal,
}

/// Exercise and meal names found in one day's content.
///
/// Both lists are deduplicated and keep first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDetails {
    pub workouts: Vec<String>,
    pub meals: Vec<String>,
}

impl DayDetails {
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty() && self.meals.is_empty()
    }

    /// Iterate every item tagged with its kind, workouts first
    pub fn items(&self) -> impl Iterator<Item = (ItemKind, &str)> {
        self.workouts
            .iter()
            .map(|w| (ItemKind::Workout, w.as_str()))
            .chain(self.meals.iter().map(|m| (ItemKind::Meal, m.as_str())))
    }
}
