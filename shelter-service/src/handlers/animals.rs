use crate::dtos::CreatedResponse;
use crate::models::{Animal, NewAnimal};
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value;
use service_core::error::AppError;

pub const LIST_ENDPOINT: &str = "/animals";
pub const CREATE_ENDPOINT: &str = "/api/animals";

const JSON_REQUIRED: &str = "JSON data required";

/// List all animals
#[utoipa::path(
    get,
    path = "/animals",
    responses(
        (status = 200, description = "All animal records", body = [Animal]),
        (status = 500, description = "Store failure", body = crate::dtos::ErrorResponse)
    ),
    tag = "Animals"
)]
pub async fn list_animals(State(state): State<AppState>) -> Result<Json<Vec<Animal>>, AppError> {
    let _timer = state.metrics.start_timer(LIST_ENDPOINT);

    let animals = state.repository.list_all().await?;

    Ok(Json(animals))
}

/// Add a new animal
#[utoipa::path(
    post,
    path = "/api/animals",
    request_body = crate::dtos::CreateAnimalRequest,
    responses(
        (status = 201, description = "Animal added", body = CreatedResponse),
        (status = 400, description = "Body missing, empty or not JSON", body = crate::dtos::ErrorResponse),
        (status = 500, description = "Body not an object or store failure", body = crate::dtos::ErrorResponse)
    ),
    tag = "Animals"
)]
pub async fn create_animal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    tracing::info!(body = %String::from_utf8_lossy(&body), "Received animal payload");

    let payload = parse_payload(&body)
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!(JSON_REQUIRED)))?;

    let _timer = state.metrics.start_timer(CREATE_ENDPOINT);

    let fields = payload.as_object().ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("JSON body must be an object"))
    })?;
    let animal =
        NewAnimal::from_payload(fields).map_err(|e| AppError::InternalError(e.into()))?;

    let id = state.repository.create(&animal).await?;

    tracing::info!(id, "Animal created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// The parsed body, or `None` when it is not JSON or is an empty or falsy value.
fn parse_payload(body: &[u8]) -> Option<Value> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .filter(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
