// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Application configuration loaded from environment variables.
//!
//! Secrets (YouTube API key, JWT signing key) are injected as environment
//! variables at deploy time and read once at startup.

use std::env;

const DEFAULT_YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_SEARCH_MAX_RESULTS: u32 = 15;
/// YouTube rejects `maxResults` above 50.
const MAX_SEARCH_RESULTS_LIMIT: u32 = 50;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Base URL of the YouTube Data API
    pub youtube_api_base_url: String,
    /// Number of videos requested per search
    pub search_max_results: u32,

    // --- Secrets ---
    /// YouTube Data API key
    pub youtube_api_key: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:8081".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            youtube_api_base_url: DEFAULT_YOUTUBE_API_BASE_URL.to_string(),
            search_max_results: DEFAULT_SEARCH_MAX_RESULTS,
            youtube_api_key: "test_youtube_api_key".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let search_max_results = match env::var("SEARCH_MAX_RESULTS") {
            Ok(raw) => parse_max_results(&raw)?,
            Err(_) => DEFAULT_SEARCH_MAX_RESULTS,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            youtube_api_base_url: env::var("YOUTUBE_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_YOUTUBE_API_BASE_URL.to_string()),
            search_max_results,

            youtube_api_key: env::var("YOUTUBE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("YOUTUBE_API_KEY"))?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }
}

fn parse_max_results(raw: &str) -> Result<u32, ConfigError> {
    let value: u32 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var: "SEARCH_MAX_RESULTS",
        reason: format!("not a number: {}", raw),
    })?;

    if value == 0 || value > MAX_SEARCH_RESULTS_LIMIT {
        return Err(ConfigError::Invalid {
            var: "SEARCH_MAX_RESULTS",
            reason: format!("must be between 1 and {}", MAX_SEARCH_RESULTS_LIMIT),
        });
    }

    Ok(value)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
