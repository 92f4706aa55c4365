use serde::{Deserialize, Serialize};
use slackmark_core::Language;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_WORKSPACE_NAME: &str = "your-workspace";
pub const DEFAULT_WORKSPACE_ID: &str = "T00000000";
pub const DEFAULT_MAPPING_FILE: &str = "anonymizer_mappings.json";

/// Tool configuration (`config.toml` in the platform config dir)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_mapping_file")]
    pub mapping_file: PathBuf,

    #[serde(default = "default_open_browser")]
    pub open_browser: bool,

    /// Guide language; detected from the locale when unset
    #[serde(default)]
    pub language: Option<Language>,

    #[serde(default)]
    pub slack: SlackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            mapping_file: default_mapping_file(),
            open_browser: default_open_browser(),
            language: None,
            slack: SlackConfig::default(),
        }
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_limit: default_page_limit(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_mapping_file() -> PathBuf {
    PathBuf::from(DEFAULT_MAPPING_FILE)
}

fn default_open_browser() -> bool {
    true
}

fn default_api_base_url() -> String {
    "https://slack.com/api".to_string()
}

fn default_page_limit() -> u32 {
    1000
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            debug!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Like [`Config::load`], but an unreadable or invalid file only warns.
    /// For commands that work offline and just want defaults.
    pub fn load_or_default() -> Self {
        Self::load_from_or_default(&Self::config_path())
    }

    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            warn!("Using default config, {} could not be loaded: {:#}", path.display(), e);
            Self::default()
        })
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "slackmark", "slackmark") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.slackmark/config.toml")
        }
    }

    pub fn language(&self) -> Language {
        self.language.unwrap_or_else(Language::detect)
    }
}

/// Slack credentials taken from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub workspace_name: String,
    pub workspace_id: String,
}

impl Credentials {
    /// Load `.env` from the working directory, overriding inherited values,
    /// then read the credentials
    pub fn from_env() -> Self {
        match dotenvy::dotenv_override() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env loaded: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            token: non_empty("SLACK_TOKEN"),
            workspace_name: non_empty("WORKSPACE_NAME")
                .unwrap_or_else(|| DEFAULT_WORKSPACE_NAME.to_string()),
            workspace_id: non_empty("WORKSPACE_ID")
                .unwrap_or_else(|| DEFAULT_WORKSPACE_ID.to_string()),
        }
    }

    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "SLACK_TOKEN is not set.\n\
                 Copy .env.sample to .env and set a user token (xoxp-...)"
            )
        })
    }

    /// First characters of the token, safe to print
    pub fn token_preview(&self) -> Option<String> {
        self.token.as_ref().map(|t| {
            let head: String = t.chars().take(10).collect();
            format!("{}... ({} chars)", head, t.chars().count())
        })
    }
}
