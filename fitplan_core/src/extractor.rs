//! Item extractor: mines exercise and meal names out of one day's markdown.
//!
//! This is a lexical heuristic, not a semantic parser:
//! 1. Normalize lines (CR, tabs, bullet glyphs, trim)
//! 2. Find workout / meal subsections by heading or label keywords
//! 3. Gather candidate lines under them, or fall back to every list-like line
//! 4. Clean each candidate down to a short name
//! 5. Deduplicate, then drop obvious cross-category false positives
//!
//! Exercise names sit left of a colon ("Squats: 3 sets of 10"), meal names
//! sit right of it ("Breakfast: Oats with fruit").

use crate::DayDetails;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Keywords marking a workout subsection heading or label
pub const WORKOUT_SECTION_KEYS: &[&str] = &[
    "workout",
    "workouts",
    "exercise",
    "exercises",
    "training",
    "strength",
    "session",
];

/// Keywords marking a meal subsection heading or label
pub const MEAL_SECTION_KEYS: &[&str] = &[
    "meal",
    "meals",
    "breakfast",
    "lunch",
    "dinner",
    "snack",
    "snacks",
    "nutrition",
    "diet",
];

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s+").unwrap());

static RE_LIST_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*\u{2022}]?\s*[0-9]*\.?\s*").unwrap());

static RE_NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+\.").unwrap());

/// Where a name stops: dashes, parentheticals, commas, wide gaps
static RE_CUT_POINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"—|–|\(|,|\s{2,}").unwrap());

/// Set/rep/duration tokens: 3x10, 3 sets, 15 reps, 30s, 30 sec, 5 mins
static RE_MEASUREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([0-9]+x[0-9]+|[0-9]+\s?sets?|[0-9]+\s?reps?|seconds?|secs?|mins?|min|[0-9]+s)\b")
        .unwrap()
});

static RE_FILLER_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(of|and|or|to)$").unwrap());

static RE_FOOD_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(rice|salad|tofu|paneer|oats|smoothie|granola|yogurt|pasta)").unwrap()
});

static RE_EXERCISE_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(squat|push[- ]?up|plank|deadlift|lunge|bench|curl|press)").unwrap()
});

fn normalize_line(line: &str) -> String {
    line.replace('\r', "")
        .replace('\t', " ")
        .replace('\u{2022}', "-")
        .trim()
        .to_string()
}

fn is_heading(line: &str) -> bool {
    RE_HEADING.is_match(line)
}

/// Reduce one candidate line to an item name.
///
/// `prefer_right_of_colon` selects the value side of a `label: value` line.
fn extract_name(line: &str, prefer_right_of_colon: bool) -> Option<String> {
    if line.is_empty() {
        return None;
    }

    let line = RE_LIST_PREFIX.replace(line, "");
    let line = line.trim();

    // stray headings, quotes and emphasis are noise
    if line.starts_with(['#', '>', '*']) {
        return None;
    }

    let mut candidate = line;
    if candidate.contains(':') {
        let mut parts = candidate.splitn(3, ':');
        let left = parts.next().unwrap_or_default();
        let right = parts.next().unwrap_or_default();
        candidate = if prefer_right_of_colon && !right.is_empty() {
            right
        } else {
            left
        };
        candidate = candidate.trim();
    }

    let candidate = match RE_CUT_POINT.find(candidate) {
        Some(cut) => &candidate[..cut.start()],
        None => candidate,
    };
    let candidate = RE_MEASUREMENT.replace_all(candidate, "");
    let candidate = candidate
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .trim();

    if RE_FILLER_WORD.is_match(candidate) {
        return None;
    }

    if candidate.chars().count() > 1 {
        Some(candidate.to_string())
    } else {
        None
    }
}

/// Indexes of lines that open a subsection for any of `keys`
fn find_section_starts(lines: &[String], keys: &[&str]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let lower = line.trim().to_lowercase();
            if is_heading(line) && keys.iter().any(|k| lower.contains(k)) {
                return true;
            }
            keys.iter().any(|k| {
                lower == *k
                    || lower.starts_with(&format!("{}:", k))
                    || lower.starts_with(&format!("{} -", k))
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Non-blank lines after `start` up to the next heading of any level
fn collect_section(lines: &[String], start: usize) -> impl Iterator<Item = &str> {
    lines[start + 1..]
        .iter()
        .take_while(|line| !is_heading(line))
        .filter(|line| !line.is_empty())
        .map(String::as_str)
}

/// Every list item, numbered item or `label: value` line in the day
fn list_like_lines(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .filter(|line| {
            line.starts_with(['-', '*', '\u{2022}'])
                || RE_NUMBERED.is_match(line)
                || line.contains(':')
        })
        .map(String::as_str)
        .collect()
}

fn candidate_pool<'a>(lines: &'a [String], keys: &[&str]) -> Vec<&'a str> {
    let starts = find_section_starts(lines, keys);
    if starts.is_empty() {
        list_like_lines(lines)
    } else {
        starts
            .into_iter()
            .flat_map(|start| collect_section(lines, start))
            .collect()
    }
}

/// Extract names from candidates, keeping first-seen order
fn unique_names(candidates: &[&str], prefer_right_of_colon: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter_map(|line| extract_name(line, prefer_right_of_colon))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Find the workout and meal names mentioned in one day's markdown.
///
/// Never fails; empty input yields empty lists. When a day has no workout
/// or meal subsection, both pools are seeded from the same list-like lines
/// and only the food/exercise denylists separate them.
pub fn extract_items_from_markdown(markdown: &str) -> DayDetails {
    if markdown.is_empty() {
        return DayDetails::default();
    }

    let lines: Vec<String> = markdown.split('\n').map(normalize_line).collect();

    let workout_lines = candidate_pool(&lines, WORKOUT_SECTION_KEYS);
    let meal_lines = candidate_pool(&lines, MEAL_SECTION_KEYS);

    let workouts: Vec<String> = unique_names(&workout_lines, false)
        .into_iter()
        .filter(|name| !RE_FOOD_TERM.is_match(name))
        .collect();

    let meals: Vec<String> = unique_names(&meal_lines, true)
        .into_iter()
        .filter(|name| !RE_EXERCISE_TERM.is_match(name))
        .collect();

    tracing::debug!(
        "Extracted {} workouts and {} meals from {} lines",
        workouts.len(),
        meals.len(),
        lines.len()
    );

    DayDetails { workouts, meals }
}
