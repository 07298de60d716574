pub mod animals;
pub mod health;
pub mod metrics;
pub mod pages;
pub mod slow;

pub use animals::{create_animal, list_animals};
pub use health::{health_check, readiness_check};
pub use pages::{animals_table, docs, index};
pub use slow::slow_endpoint;
