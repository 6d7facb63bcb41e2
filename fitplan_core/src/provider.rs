//! Classification of provider failures into user-facing messages.
//!
//! Plan and image providers report failures as free-form error strings;
//! these are mapped to a fixed set of outcomes with an HTTP status code.

use std::fmt;

/// Why plan generation failed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanFailure {
    MissingKey,
    InvalidKey,
    RateLimited,
    Unavailable,
    Other(String),
}

impl PlanFailure {
    /// Classify a provider error message. Checks run in a fixed order.
    pub fn classify(message: &str) -> Self {
        if message.contains("API key") {
            PlanFailure::MissingKey
        } else if message.contains("401") {
            PlanFailure::InvalidKey
        } else if message.contains("429") {
            PlanFailure::RateLimited
        } else if message.contains("503") {
            PlanFailure::Unavailable
        } else {
            PlanFailure::Other(message.to_string())
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            PlanFailure::RateLimited => 429,
            _ => 500,
        }
    }

    pub fn user_message(&self) -> &str {
        match self {
            PlanFailure::MissingKey => "API key is not configured. Please contact support.",
            PlanFailure::InvalidKey => "Invalid API Key provided.",
            PlanFailure::RateLimited => {
                "System is experiencing high traffic. Please try again in a minute."
            }
            PlanFailure::Unavailable => {
                "AI Service is temporarily unavailable. Please try again later."
            }
            PlanFailure::Other(message) => message,
        }
    }
}

impl fmt::Display for PlanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.user_message(), self.status_code())
    }
}

/// Why an item image could not be generated
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageFailure {
    /// The model is gated behind a license the account hasn't accepted
    Gated,
    Failed,
}

impl ImageFailure {
    pub fn classify(message: &str) -> Self {
        if message.contains("403") || message.contains("gated") {
            ImageFailure::Gated
        } else {
            ImageFailure::Failed
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ImageFailure::Gated => 403,
            ImageFailure::Failed => 500,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ImageFailure::Gated => "Please accept the FLUX.1-dev license on HuggingFace.co.",
            ImageFailure::Failed => "Failed to generate image",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_failure_classification() {
        assert_eq!(
            PlanFailure::classify("GROQ API key missing"),
            PlanFailure::MissingKey
        );
        assert_eq!(
            PlanFailure::classify("401 Unauthorized"),
            PlanFailure::InvalidKey
        );
        assert_eq!(
            PlanFailure::classify("Error 429: rate limit"),
            PlanFailure::RateLimited
        );
        assert_eq!(
            PlanFailure::classify("503 Service Unavailable"),
            PlanFailure::Unavailable
        );
        assert_eq!(
            PlanFailure::classify("socket hang up"),
            PlanFailure::Other("socket hang up".into())
        );
    }

    #[test]
    fn test_plan_failure_priority_and_status() {
        // the key check wins over the status code in the same message
        let failure = PlanFailure::classify("429 API key revoked");
        assert_eq!(failure, PlanFailure::MissingKey);
        assert_eq!(failure.status_code(), 500);

        assert_eq!(PlanFailure::RateLimited.status_code(), 429);
        assert_eq!(PlanFailure::Unavailable.status_code(), 500);
        assert_eq!(
            PlanFailure::Other("boom".into()).user_message(),
            "boom"
        );
    }

    #[test]
    fn test_image_failure_classification() {
        let gated = ImageFailure::classify("model is gated");
        assert_eq!(gated, ImageFailure::Gated);
        assert_eq!(gated.status_code(), 403);
        assert_eq!(ImageFailure::classify("HTTP 403"), ImageFailure::Gated);

        let failed = ImageFailure::classify("timeout");
        assert_eq!(failed.status_code(), 500);
        assert_eq!(failed.user_message(), "Failed to generate image");
    }
}
