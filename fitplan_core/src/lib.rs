#![forbid(unsafe_code)]

//! Core text-processing pipeline for AI-generated fitness plans.
//!
//! This crate provides:
//! - Plan sectioning (intro, per-day sections, tips) from generated markdown
//! - Workout and meal item extraction from a day's content
//! - User profile validation and plan-generation prompt construction
//! - Image request fan-out, provider failure classification, narration text
//! - A saved-plan archive

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod sectioner;
pub mod extractor;
pub mod profile;
pub mod prompt;
pub mod provider;
pub mod images;
pub mod narration;
pub mod archive;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use sectioner::parse_plan_markdown;
pub use extractor::extract_items_from_markdown;
pub use profile::UserProfile;
pub use prompt::{build_plan_prompt, PlanReply, PlanRequest};
pub use provider::{ImageFailure, PlanFailure};
pub use images::{image_requests_for_day, ItemImageRequest};
pub use narration::day_speech_text;
pub use archive::{JsonlPlanStore, PlanStore, SavedPlan};
