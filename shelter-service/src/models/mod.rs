//! Domain models for shelter-service.

pub mod animal;

pub use animal::{AgeValue, Animal, NewAnimal, UnsupportedValue};
