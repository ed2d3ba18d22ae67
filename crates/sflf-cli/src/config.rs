//! `sflf.toml` configuration.
//!
//! Every key is optional. A missing default file means defaults; a file named
//! with `--config` must exist and parse.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sflf_map::{Matcher, RemoteConfig, RemoteStrategy};
use sflf_standards::{
    COLUMN_SYNONYMS_FILE, STATUS_SYNONYMS_FILE, SynonymDictionary, default_standards_root,
    load_dictionary,
};

pub const DEFAULT_CONFIG_FILE: &str = "sflf.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub synonyms: SynonymPaths,
    pub output: OutputSettings,
    pub remote: RemoteSettings,
}

/// Synonym files; unset paths resolve inside the default standards directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynonymPaths {
    pub columns: Option<PathBuf>,
    pub statuses: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("outputs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Loads `explicit`, or `sflf.toml` from the working directory when it
    /// exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("parse config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn column_synonyms_path(&self) -> PathBuf {
        self.synonyms
            .columns
            .clone()
            .unwrap_or_else(|| default_standards_root().join(COLUMN_SYNONYMS_FILE))
    }

    pub fn status_synonyms_path(&self) -> PathBuf {
        self.synonyms
            .statuses
            .clone()
            .unwrap_or_else(|| default_standards_root().join(STATUS_SYNONYMS_FILE))
    }

    pub fn load_dictionary(&self) -> Result<SynonymDictionary> {
        let columns = self.column_synonyms_path();
        let statuses = self.status_synonyms_path();
        load_dictionary(&columns, &statuses).with_context(|| {
            format!(
                "load synonyms from {} and {}",
                columns.display(),
                statuses.display()
            )
        })
    }

    /// The matcher for this configuration. `force_remote` enables the remote
    /// strategy even when the file leaves it off.
    pub fn build_matcher(
        &self,
        dictionary: std::sync::Arc<SynonymDictionary>,
        force_remote: bool,
    ) -> Result<Matcher> {
        let matcher = Matcher::new(dictionary);
        if !(self.remote.enabled || force_remote) {
            return Ok(matcher);
        }
        let remote = &self.remote;
        let config = RemoteConfig::from_env(
            remote.endpoint.clone(),
            remote.model.clone(),
            &remote.api_key_env,
            Duration::from_secs(remote.timeout_secs),
        )
        .context("configure remote matching")?;
        let strategy = RemoteStrategy::new(config).context("configure remote matching")?;
        tracing::info!(endpoint = %remote.endpoint, model = %remote.model, "remote matching enabled");
        Ok(matcher.with_remote(strategy))
    }
}
