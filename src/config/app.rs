//! Application configuration loading from config.toml
//!
//! Every section is optional. A missing file yields the built-in defaults, which match
//! the demo setup: two seed objectives, the static rate table, the suggested categories
//! and the demo login.

use crate::core::currency::{CATEGORIES, Currency, ExchangeRates};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Objectives seeded into an empty database
    pub objectives: Vec<ObjectiveConfig>,
    /// Static exchange-rate table
    pub exchange_rates: ExchangeRates,
    /// Category suggestions for transactions and documents
    pub categories: Vec<String>,
    /// Demo credential pair accepted by the login screen
    pub auth: AuthConfig,
    /// Milestone generation settings
    pub ai: AiConfig,
}

/// Configuration for a single seeded objective
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectiveConfig {
    /// Name of the objective
    pub name: String,
    /// Amount to reach
    pub target_amount: f64,
    /// Currency of the target amount
    pub target_currency: Currency,
    /// Date the objective should be reached by
    pub deadline: NaiveDate,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Credentials accepted by the static authenticator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Accepted e-mail address
    pub email: String,
    /// Accepted password
    pub password: String,
}

/// Settings for the milestone suggestion client
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Model name passed to the generation endpoint
    pub model: String,
    /// Base URL of the generation API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            objectives: default_objectives(),
            exchange_rates: ExchangeRates::default(),
            categories: CATEGORIES.iter().map(ToString::to_string).collect(),
            auth: AuthConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            email: "admin@fingoal.com".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }
}

fn default_objectives() -> Vec<ObjectiveConfig> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        ObjectiveConfig {
            name: "Intercâmbio Irlanda".to_string(),
            target_amount: 50000.0,
            target_currency: Currency::Brl,
            deadline: date(2025, 12, 1),
            description: Some("Viagem de estudos e trabalho em Dublin.".to_string()),
        },
        ObjectiveConfig {
            name: "Nova Moto".to_string(),
            target_amount: 15000.0,
            target_currency: Currency::Brl,
            deadline: date(2024, 10, 15),
            description: Some("Comprar uma Honda CB 300F Twister.".to_string()),
        },
    ]
}

impl AppConfig {
    fn validate(&self) -> Result<()> {
        self.exchange_rates.validate()?;
        for objective in &self.objectives {
            if objective.name.trim().is_empty() {
                return Err(Error::Config {
                    message: "Seed objective name cannot be empty".to_string(),
                });
            }
            if !objective.target_amount.is_finite() || objective.target_amount <= 0.0 {
                return Err(Error::Config {
                    message: format!(
                        "Seed objective '{}' needs a positive target amount",
                        objective.name
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Parses and validates configuration from a TOML string.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
/// - A seed objective or exchange rate is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!("No configuration at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    tracing::debug!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            categories = ["Transporte", "Outros"]

            [exchange_rates]
            usd = 5.0
            eur = 6.0

            [auth]
            email = "me@example.com"
            password = "secret"

            [ai]
            model = "gemini-test"

            [[objectives]]
            name = "Viagem para Itália"
            target_amount = 30000.0
            target_currency = "EUR"
            deadline = "2026-07-01"
            description = "Roma e Florença"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.objectives.len(), 1);
        assert_eq!(config.objectives[0].target_currency, Currency::Eur);
        assert_eq!(
            config.objectives[0].deadline,
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
        );
        assert_eq!(config.exchange_rates.usd, 5.0);
        // Unset rate keeps its default
        assert_eq!(config.exchange_rates.brl, 1.0);
        assert_eq!(config.categories, vec!["Transporte", "Outros"]);
        assert_eq!(config.auth.email, "me@example.com");
        assert_eq!(config.ai.model, "gemini-test");
        assert_eq!(config.ai.timeout_secs, 30);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.objectives.len(), 2);
        assert_eq!(config.objectives[0].target_amount, 50000.0);
        assert_eq!(config.categories.len(), CATEGORIES.len());
        assert_eq!(config.auth.email, "admin@fingoal.com");
    }

    #[test]
    fn test_rejects_unknown_currency() {
        let toml_str = r#"
            [[objectives]]
            name = "Trip"
            target_amount = 100.0
            target_currency = "GBP"
            deadline = "2026-01-01"
        "#;
        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_non_positive_target() {
        let toml_str = r#"
            [[objectives]]
            name = "Trip"
            target_amount = 0.0
            target_currency = "BRL"
            deadline = "2026-01-01"
        "#;
        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config("definitely/not/here/config.toml").unwrap();
        assert_eq!(config.objectives.len(), 2);
    }
}
