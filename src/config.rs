use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Storefront fetch settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    pub referrer: String,
    pub accept_language: String,
    pub language: String,
    pub country: String,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://play.google.com/store/apps/details".into(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".into(),
            referrer: "https://www.google.com/".into(),
            accept_language: "en-US,en;q=0.9".into(),
            language: "en".into(),
            country: "us".into(),
            timeout_seconds: 20,
            max_redirects: 10,
        }
    }
}

/// Text-generation endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.openai.com/v1/chat/completions".into(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".into(),
            temperature: 0.7,
            max_tokens: 800,
            timeout_seconds: 60,
        }
    }
}

impl NarrativeConfig {
    /// Key from the file, or from the environment when the file leaves it blank.
    pub fn resolved_api_key(&self) -> Option<String> {
        let key = if self.api_key.trim().is_empty() {
            std::env::var(API_KEY_ENV).unwrap_or_default()
        } else {
            self.api_key.clone()
        };
        let key = key.trim().to_string();
        (!key.is_empty()).then_some(key)
    }
}

/// Keyword mining profile: list sizes and the simulated rank layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeywordProfile {
    pub primary_count: usize,
    pub secondary_count: usize,
    pub position_base: u32,
    pub position_stride: u32,
}

impl Default for KeywordProfile {
    fn default() -> Self {
        Self {
            primary_count: 5,
            secondary_count: 6,
            position_base: 3,
            position_stride: 4,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub narrative: NarrativeConfig,
    pub keywords: KeywordProfile,
    pub analysis_timeout_seconds: Option<u64>,
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.fetch.timeout_seconds, 20);
        assert_eq!(config.narrative.timeout_seconds, 60);
        assert_eq!(config.keywords, KeywordProfile::default());
        assert!(config.analysis_timeout_seconds.is_none());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"narrative": {{"model": "gpt-4o-mini", "api_key": "sk-test"}}, "keywords": {{"primary_count": 4}}}}"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.narrative.model, "gpt-4o-mini");
        assert_eq!(config.narrative.max_tokens, 800);
        assert_eq!(config.narrative.resolved_api_key().as_deref(), Some("sk-test"));
        assert_eq!(config.keywords.primary_count, 4);
        assert_eq!(config.keywords.secondary_count, 6);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(load_config(path), Err(ConfigError::Io(_))));
    }
}
