use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MetricsError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub bitbucket: BitbucketConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitbucketConfig {
    /// Server root, e.g. "https://git.example.com". The REST prefix is
    /// appended by the client.
    pub base_url: String,
    /// Project key the repositories live under.
    pub project: String,
    #[serde(default)]
    pub repos: Vec<String>,
    /// Bearer token; may instead come from the BITBUCKET_TOKEN env var.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the dated snapshot files are written into.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_file(path);
        }

        // Search candidate paths in order
        let mut candidates = vec![PathBuf::from("revmetrics.toml")];

        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".config/revmetrics/config.toml"));
        }

        if let Some(proj_dirs) = ProjectDirs::from("", "", "revmetrics") {
            candidates.push(proj_dirs.config_dir().join("config.toml"));
        }

        for config_path in &candidates {
            if config_path.exists() {
                return Self::load_file(config_path);
            }
        }

        Err(MetricsError::Config(
            "no config file found; create ./revmetrics.toml or pass --config".into(),
        ))
    }

    fn load_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path).map_err(|source| MetricsError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            toml::from_str(&content).map_err(|source| MetricsError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.bitbucket.base_url.is_empty() {
            return Err(MetricsError::Config("bitbucket.base_url must be set".into()));
        }
        if self.bitbucket.project.is_empty() {
            return Err(MetricsError::Config("bitbucket.project must be set".into()));
        }
        if self.bitbucket.repos.is_empty() {
            return Err(MetricsError::Config(
                "bitbucket.repos must list at least one repository".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the API token: config file first, then the BITBUCKET_TOKEN
    /// environment variable.
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(token) = &self.bitbucket.token
            && !token.is_empty()
        {
            return Ok(token.clone());
        }

        if let Ok(token) = std::env::var("BITBUCKET_TOKEN")
            && !token.is_empty()
        {
            debug!("Token resolved via BITBUCKET_TOKEN env var");
            return Ok(token);
        }

        Err(MetricsError::Config(
            "no API token: set bitbucket.token in the config file \
             or the BITBUCKET_TOKEN environment variable"
                .into(),
        ))
    }
}
