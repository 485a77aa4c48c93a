//! Configuration management for the Lambda.

use std::env;

use crate::{Error, Result};

/// Default Notion API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Notion API version sent with every request.
pub const DEFAULT_NOTION_VERSION: &str = "2021-05-13";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Integration token forwarded as a bearer credential
    pub notion_token: String,
    /// Database to query
    pub database_id: String,
    /// Name of the checkbox property to test
    pub checkbox_property: String,
    /// Notion API base URL, without trailing slash
    pub api_base_url: String,
    /// Value of the `Notion-Version` header
    pub notion_version: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{} not set", key)))
        };

        Ok(Self {
            notion_token: required("ENV_NOTION_TOKEN")?,
            database_id: required("ENV_DATABASE_ID")?,
            checkbox_property: required("ENV_CHECKBOX_PROPERTY_NAME")?,
            api_base_url: lookup("NOTION_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            notion_version: lookup("NOTION_VERSION")
                .unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string()),
        })
    }
}
