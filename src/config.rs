//! Application configuration loaded from CLI, environment, and files.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest
//! to highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.moodreel.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `MOODREEL_API_BASE_URL` and friends
//! 4. **Command-line arguments** – `--api-base-url`, `--movie-id`, …
//!
//! # Configuration File
//!
//! ```toml
//! api_base_url = "http://localhost:8000"
//! emotion = "happy"
//! timeout_secs = 20
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

/// API base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Application configuration supporting CLI, environment, and file
/// sources.
///
/// # Environment Variables
///
/// - `MOODREEL_API_BASE_URL` or `--api-base-url`: movie API base URL
/// - `MOODREEL_MOVIE_ID` or `--movie-id`: movie to inspect
/// - `MOODREEL_EMOTION` or `--emotion`: emotion the session opens under
/// - `MOODREEL_RATE_EMOTION_ID` or `--rate-emotion-id`: emotion to rate
///   the inspected movie with
/// - `MOODREEL_TIMEOUT_SECS` or `--timeout-secs`: HTTP request timeout
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "MOODREEL",
    discovery(
        dotfile_name = ".moodreel.toml",
        config_file_name = "moodreel.toml",
        app_name = "moodreel"
    )
)]
pub struct MoodreelConfig {
    /// Base URL of the movie API.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base-url <URL>` or `-a <URL>`
    /// - Environment: `MOODREEL_API_BASE_URL`
    /// - Config file: `api_base_url = "..."`
    #[ortho_config(cli_short = 'a')]
    pub api_base_url: Option<String>,

    /// Movie to inspect. Without it the CLI lists the emotion catalogue.
    ///
    /// Can be provided via:
    /// - CLI: `--movie-id <ID>` or `-m <ID>`
    /// - Environment: `MOODREEL_MOVIE_ID`
    /// - Config file: `movie_id = 42`
    #[ortho_config(cli_short = 'm')]
    pub movie_id: Option<u64>,

    /// Emotion name the rating session opens under; the close summary
    /// reports the match fraction for this emotion.
    ///
    /// Can be provided via:
    /// - CLI: `--emotion <NAME>` or `-e <NAME>`
    /// - Environment: `MOODREEL_EMOTION`
    /// - Config file: `emotion = "happy"`
    #[ortho_config(cli_short = 'e')]
    pub emotion: Option<String>,

    /// Emotion identifier to submit a rating with while inspecting a
    /// movie.
    ///
    /// Can be provided via:
    /// - CLI: `--rate-emotion-id <ID>` or `-r <ID>`
    /// - Environment: `MOODREEL_RATE_EMOTION_ID`
    /// - Config file: `rate_emotion_id = 1`
    #[ortho_config(cli_short = 'r')]
    pub rate_emotion_id: Option<u64>,

    /// HTTP request timeout in seconds.
    ///
    /// Can be provided via:
    /// - CLI: `--timeout-secs <SECS>`
    /// - Environment: `MOODREEL_TIMEOUT_SECS`
    /// - Config file: `timeout_secs = 20`
    #[ortho_config()]
    pub timeout_secs: Option<u64>,
}

impl MoodreelConfig {
    /// API base URL, falling back to [`DEFAULT_API_BASE_URL`].
    #[must_use]
    pub fn resolve_api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
    }

    /// HTTP request timeout, defaulting to 20 seconds.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        match self.timeout_secs {
            Some(secs) => Duration::from_secs(secs),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Emotion name the session opens under, empty when unset.
    #[must_use]
    pub fn resolve_emotion(&self) -> String {
        self.emotion.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let config = MoodreelConfig::default();

        assert_eq!(config.resolve_api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.resolve_emotion(), "");
        assert!(config.movie_id.is_none());
    }

    #[test]
    fn configured_values_take_precedence_over_defaults() {
        let config = MoodreelConfig {
            api_base_url: Some("https://api.example.test".to_owned()),
            timeout_secs: Some(3),
            emotion: Some("happy".to_owned()),
            ..Default::default()
        };

        assert_eq!(config.resolve_api_base_url(), "https://api.example.test");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.resolve_emotion(), "happy");
    }
}
