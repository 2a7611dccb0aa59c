//! Secrets and overrides read from environment variables.
//!
//! Values here are looked up when needed rather than stored in [`super::app::AppConfig`],
//! so API keys never end up in config files or logs.

/// Returns the API key for the milestone generation service.
///
/// Reads `GEMINI_API_KEY`, then `API_KEY`. Blank values count as missing.
#[must_use]
pub fn get_ai_api_key() -> Option<String> {
    ["GEMINI_API_KEY", "API_KEY"]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Returns the user id the command-line front end acts as.
///
/// Reads `FINGOAL_USER_ID`, falling back to the demo user `u1`.
#[must_use]
pub fn get_user_id() -> String {
    std::env::var("FINGOAL_USER_ID")
        .ok()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| "u1".to_string())
}
