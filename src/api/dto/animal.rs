//! DTOs for the animal endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::AnimalKind;

/// Request for one animal image.
///
/// `animal` wins when both fields are set; otherwise `query` is routed
/// through the configured tool selector.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AnimalRequest {
    #[validate(length(max = 32))]
    pub animal: Option<String>,

    #[validate(length(max = 500))]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalResponse {
    pub success: bool,
    pub image_url: String,
    pub animal: AnimalKind,
    pub message: String,
}

impl AnimalResponse {
    pub fn new(image_url: impl Into<String>, animal: AnimalKind, message: impl Into<String>) -> Self {
        Self {
            success: true,
            image_url: image_url.into(),
            animal,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnimalListResponse {
    pub animals: Vec<AnimalKind>,
}
