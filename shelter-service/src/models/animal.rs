//! Animal records as stored in and read from the `animals` table.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;

/// A persisted animal. Every column except `id` is nullable in the store.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Animal {
    pub id: i32,
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "animal_type")]
    pub species: Option<String>,
    pub age: Option<i32>,
    /// Set by the store on insert.
    pub arrival_date: Option<NaiveDate>,
    #[serde(rename = "health")]
    #[sqlx(rename = "health_status")]
    pub health: Option<String>,
}

/// A submitted `age`, kept in the form the store should coerce it from.
#[derive(Debug, Clone, PartialEq)]
pub enum AgeValue {
    /// A JSON number. The store rounds it to an integer.
    Number(f64),
    /// Anything else, as text. The store parses it as an integer.
    Text(String),
}

impl AgeValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AgeValue::Number(n) => Some(*n),
            AgeValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AgeValue::Number(_) => None,
            AgeValue::Text(s) => Some(s),
        }
    }
}

/// A payload field holding a value no column can take.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Cannot store {kind} value in field '{field}'")]
pub struct UnsupportedValue {
    pub field: &'static str,
    pub kind: &'static str,
}

/// Values for a new row, taken from a creation payload without validation.
///
/// Text columns hold the submitted value rendered as text, or `None` when the
/// key was absent or `null`. Column typing (e.g. `age` as an integer) is left
/// to the store, so a value it cannot coerce fails the insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewAnimal {
    pub name: Option<String>,
    pub species: Option<String>,
    pub age: Option<AgeValue>,
    pub health: Option<String>,
}

impl NewAnimal {
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, UnsupportedValue> {
        let age = match scalar(payload, "age")? {
            None => None,
            Some(Value::Number(n)) => n.as_f64().map(AgeValue::Number),
            Some(other) => text(other).map(AgeValue::Text),
        };

        Ok(Self {
            name: scalar(payload, "name")?.and_then(text),
            species: scalar(payload, "type")?.and_then(text),
            age,
            health: scalar(payload, "health")?.and_then(text),
        })
    }
}

/// The value under `field`, rejecting arrays and objects.
fn scalar<'a>(
    payload: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a Value>, UnsupportedValue> {
    match payload.get(field) {
        Some(Value::Array(_)) => Err(UnsupportedValue { field, kind: "array" }),
        Some(Value::Object(_)) => Err(UnsupportedValue { field, kind: "object" }),
        other => Ok(other),
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
