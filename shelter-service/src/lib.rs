//! Shelter Service - Animal records over HTTP with Prometheus metrics.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
