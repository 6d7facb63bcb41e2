//! Plan-generation prompt and request body.
//!
//! The prompt pins the markdown template the sectioner depends on: any change
//! to the headings here must be mirrored in `sectioner`.

use crate::config::GenerationConfig;
use crate::sectioner::TIPS_HEADING;
use crate::UserProfile;
use serde::{Deserialize, Serialize};

/// Build the coaching prompt for a validated profile
pub fn build_plan_prompt(profile: &UserProfile) -> String {
    let name = &profile.name;

    format!(
        r#"Act as a professional elite fitness coach and nutritionist.
Create a personalized 7-day workout and diet plan for the following person.

Profile:
- Name: {name}
- Age: {age}
- Gender: {gender}
- Height: {height} cm
- Weight: {weight} kg
- Fitness Goal: {goal}
- Experience Level: {level}
- Available Location: {location}
- Dietary Preference: {diet}
- Medical History: {medical}
- Stress Level: {stress}

OUTPUT FORMAT (VERY IMPORTANT):
Follow this format EXACTLY and add nothing else.
Return the plan ONLY in clean Markdown using EXACTLY this structure:

# Personalized Fitness Plan for {name}

## Introduction
<Short intro about the person and overall philosophy>

### Day 1: <Short Day Title>
#### Workout
* ...
* ...
#### Meals
* Breakfast: ...
* Lunch: ...
* Snack: ...
* Dinner: ...

### Day 2: <Short Day Title>
#### Workout
* ...
#### Meals
* Breakfast: ...
* Lunch: ...
* Snack: ...
* Dinner: ...

... (repeat the same pattern up to Day 7) ...

{tips}
* ...
* ...
* ...

## Motivational Quote
*"Your short motivational quote here"*

RULES:
- Use ONLY the headings shown above.
- Do NOT add extra top-level sections.
- Use `*` for bullet points.
- Write each exercise as `Name: sets x reps` and each meal as `Meal: Dish`.
- Respect the "{location}" and "{diet}" constraints.
"#,
        name = name,
        age = profile.age,
        gender = profile.gender,
        height = profile.height,
        weight = profile.weight,
        goal = profile.goal,
        level = profile.level,
        location = profile.location,
        diet = profile.diet,
        medical = profile.medical_history_or_default(),
        stress = profile.stress_level_or_default(),
        tips = TIPS_HEADING,
    )
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completion request body for the plan generator
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

impl PlanRequest {
    pub fn new(prompt: String, config: &GenerationConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt,
            }],
        }
    }
}

/// Reply from the plan-generation endpoint: `{ "plan": ... }` or `{ "error": ... }`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PlanReply {
    Plan { plan: String },
    Error { error: String },
}

impl PlanReply {
    /// The plan markdown, or the provider's error message
    pub fn into_result(self) -> std::result::Result<String, String> {
        match self {
            PlanReply::Plan { plan } => Ok(plan),
            PlanReply::Error { error } => Err(error),
        }
    }
}
