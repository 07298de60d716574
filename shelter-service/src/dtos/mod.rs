//! Request and response bodies of the JSON API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Creation payload as documented. Every key is optional and the handler
/// reads the raw JSON object, so mistyped values reach the store unchanged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAnimalRequest {
    #[schema(example = "Rex")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "dog")]
    pub species: Option<String>,
    #[schema(example = 3)]
    pub age: Option<i32>,
    #[schema(example = "good")]
    pub health: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlowResponse {
    pub status: String,
    /// Seconds slept before answering.
    pub delay: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
