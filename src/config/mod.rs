/// Database configuration and connection management
pub mod database;

/// Application configuration loading from config.toml
pub mod app;

/// Secrets and overrides read from environment variables
pub mod env;
