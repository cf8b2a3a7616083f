//! PrimeVitality — wellness-plan service for the 50+ crowd.

pub mod app;
pub mod config;
pub mod error;
pub mod gateway;
pub mod llm;
pub mod plan;
pub mod profile;
pub mod routes;
