use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Config filename looked up in the working directory when no explicit path
/// is given.
const CONFIG_FILENAME: &str = "sahayak.json";

/// Environment override for the config file location.
const CONFIG_ENV: &str = "SAHAYAK_CONFIG";

/// Environment override for the dataset location.
const DATASET_ENV: &str = "SAHAYAK_DATASET";

/// Complete configuration payload. Every field has a serde default so a
/// partial config file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub retrieval: RetrievalSettings,
    #[serde(default)]
    pub chat: ChatSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSettings::default(),
            retrieval: RetrievalSettings::default(),
            chat: ChatSettings::default(),
        }
    }
}

impl AppConfig {
    /// Resolve configuration for this invocation: an explicit `SAHAYAK_CONFIG`
    /// path, else `./sahayak.json` when present, else compiled defaults. The
    /// `SAHAYAK_DATASET` override is applied last.
    pub fn load() -> Self {
        let path = env::var_os(CONFIG_ENV).map(PathBuf::from).or_else(|| {
            let local = PathBuf::from(CONFIG_FILENAME);
            local.exists().then_some(local)
        });

        let mut config = match path {
            Some(path) => Self::from_file(&path),
            None => Self::default(),
        };

        if let Some(dataset) = env::var_os(DATASET_ENV) {
            config.dataset.path = PathBuf::from(dataset);
        }

        config
    }

    /// Read a JSON config file, falling back to defaults on any read or parse
    /// problem.
    pub fn from_file(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(config) => config,
                Err(err) => {
                    warn!(target: "sahayak::settings", ?path, %err, "config file unparsable; using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(target: "sahayak::settings", ?path, %err, "config file unreadable; using defaults");
                Self::default()
            }
        }
    }

    /// Reject clearly broken configurations before any session is built.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.retrieval.threshold) {
            return Err("retrieval.threshold must be in [0.0, 1.0]".into());
        }
        if self.retrieval.suggestion_count == 0 {
            return Err("retrieval.suggestion_count must be > 0".into());
        }
        if self.chat.max_tokens == 0 {
            return Err("chat.max_tokens must be > 0".into());
        }
        Ok(())
    }
}

/// Where the corpus CSV lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

/// Knobs for the retrieval backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSettings {
    /// Exclusive acceptance cutoff for similarity scores.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    /// How many leading corpus queries to cache as suggestions.
    #[serde(default = "default_suggestion_count")]
    pub suggestion_count: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            suggestion_count: default_suggestion_count(),
        }
    }
}

/// Parameters for the hosted chat-completion API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Explicit key; when absent the `GROQ_API_KEY` environment variable is
    /// consulted at client construction.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_chat_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
        }
    }
}

impl ChatSettings {
    pub const API_KEY_ENV: &'static str = "GROQ_API_KEY";

    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| env::var(Self::API_KEY_ENV).ok().filter(|key| !key.is_empty()))
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/pension_grievance_dataset.csv")
}

const fn default_threshold() -> f32 {
    0.3
}

const fn default_suggestion_count() -> usize {
    10
}

fn default_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_chat_model() -> String {
    "llama3-8b-8192".to_string()
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    1024
}
