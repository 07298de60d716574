//! Services module for shelter-service.

pub mod error;
pub mod metrics;
pub mod repository;

pub use error::StoreError;
pub use metrics::ShelterMetrics;
pub use repository::{AnimalRepository, PgAnimalRepository};
