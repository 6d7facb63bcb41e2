//! Image request fan-out for extracted items.
//!
//! Each workout or meal name becomes one text-to-image request whose prompt
//! carries the day title as context.

use crate::config::ImageConfig;
use crate::{DayDetails, DaySection, ItemKind};
use serde::{Deserialize, Serialize};

/// Prompt for a single item image
pub fn image_prompt(keywords: &str, title: &str) -> String {
    format!(
        "Cinematic shot of {}, context is {}, professional photography, 8k resolution, \
         highly detailed, realistic textures, soft studio lighting",
        keywords, title
    )
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ImageParameters {
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
}

/// Text-to-image request body
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ImageRequest {
    pub model: String,
    pub provider: String,
    pub inputs: String,
    pub parameters: ImageParameters,
}

impl ImageRequest {
    pub fn new(inputs: String, config: &ImageConfig) -> Self {
        Self {
            model: config.model.clone(),
            provider: config.provider.clone(),
            inputs,
            parameters: ImageParameters {
                num_inference_steps: config.num_inference_steps,
                guidance_scale: config.guidance_scale,
            },
        }
    }
}

/// An image request tied to the item it illustrates
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ItemImageRequest {
    pub kind: ItemKind,
    pub item: String,
    pub request: ImageRequest,
}

/// One request per extracted item, workouts first then meals
pub fn image_requests_for_day(
    day: &DaySection,
    details: &DayDetails,
    config: &ImageConfig,
) -> Vec<ItemImageRequest> {
    let requests: Vec<ItemImageRequest> = details
        .items()
        .map(|(kind, item)| ItemImageRequest {
            kind,
            item: item.to_string(),
            request: ImageRequest::new(image_prompt(item, &day.title), config),
        })
        .collect();

    tracing::debug!("Built {} image requests for {}", requests.len(), day.title);
    requests
}
