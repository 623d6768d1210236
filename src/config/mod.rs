/// Database configuration and connection management
pub mod database;

/// Budget plan (category fraction table) loading from plan.toml
pub mod plan;
