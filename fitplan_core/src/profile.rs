//! User fitness profile and its validation rules.
//!
//! The profile is the input to plan generation. Profiles are read from TOML
//! or JSON files and validated before a prompt is built from them.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Primary fitness goal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Goal {
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
    Maintenance,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

/// Where the user will train
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Location {
    Home,
    Gym,
    Outdoor,
}

/// Dietary preference
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Diet {
    Veg,
    #[serde(rename = "Non-Veg")]
    NonVeg,
    Vegan,
    Keto,
    #[serde(rename = "No Preference")]
    NoPreference,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        })
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Maintenance => "Maintenance",
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Location::Home => "Home",
            Location::Gym => "Gym",
            Location::Outdoor => "Outdoor",
        })
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Diet::Veg => "Veg",
            Diet::NonVeg => "Non-Veg",
            Diet::Vegan => "Vegan",
            Diet::Keto => "Keto",
            Diet::NoPreference => "No Preference",
        })
    }
}

/// A user's fitness profile as collected by the intake form.
///
/// Height is in centimetres and weight in kilograms.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub height: f64,
    pub weight: f64,
    pub gender: Gender,
    pub goal: Goal,
    pub level: Level,
    pub location: Location,
    pub diet: Diet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<String>,
}

impl UserProfile {
    /// Load a profile from a `.toml` file, or JSON for any other extension
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let profile: UserProfile = if is_toml {
            toml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };

        tracing::debug!("Loaded profile for {} from {:?}", profile.name, path);
        Ok(profile)
    }

    /// Collect every rule violation; empty means the profile is usable
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.chars().count() < 2 {
            errors.push("Name must be at least 2 characters.".to_string());
        }
        if !(16..=99).contains(&self.age) {
            errors.push("Age must be between 16 and 99.".to_string());
        }
        if !(50.0..=250.0).contains(&self.height) {
            errors.push("Height (cm) must be between 50 and 250.".to_string());
        }
        if !(30.0..=300.0).contains(&self.weight) {
            errors.push("Weight (kg) must be between 30 and 300.".to_string());
        }

        errors
    }

    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Profile(errors.join(" ")))
        }
    }

    pub fn medical_history_or_default(&self) -> &str {
        non_blank(self.medical_history.as_deref()).unwrap_or("None")
    }

    pub fn stress_level_or_default(&self) -> &str {
        non_blank(self.stress_level.as_deref()).unwrap_or("Normal")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) fn sample_profile() -> UserProfile {
    UserProfile {
        name: "Asha".into(),
        age: 29,
        height: 165.0,
        weight: 62.5,
        gender: Gender::Female,
        goal: Goal::MuscleGain,
        level: Level::Intermediate,
        location: Location::Home,
        diet: Diet::Veg,
        medical_history: None,
        stress_level: Some("High".into()),
    }
}
