//! # Settings
//!
//! The superproject may carry a `.chronicle.yaml` file at its root to
//! override the defaults in [`crate::defaults`]. Every key is optional:
//!
//! ```yaml
//! update_command: ["python3", "teltochronicle.py"]
//! commit_message: "Update firmware metadata and SDKs"
//! protected_branches: ["master", "stable"]
//! remote: origin
//! models_dir: models
//! ```
//!
//! Unknown keys are rejected so that typos do not silently fall back to a
//! default.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::defaults;
use crate::error::{Error, Result};

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Program and arguments of the metadata/SDK fetch script.
    pub update_command: Vec<String>,
    pub commit_message: String,
    /// Branch names the pull workflow never fast-forwards.
    pub protected_branches: Vec<String>,
    pub remote: String,
    pub models_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            update_command: defaults::update_command(),
            commit_message: defaults::COMMIT_MESSAGE.to_string(),
            protected_branches: defaults::protected_branches(),
            remote: defaults::REMOTE.to_string(),
            models_dir: PathBuf::from(defaults::MODELS_DIR),
        }
    }
}

impl Settings {
    pub fn is_protected(&self, branch: &str) -> bool {
        self.protected_branches.iter().any(|b| b == branch)
    }

    /// Path of a model's SDK history repository, relative to the superproject.
    pub fn model_repo_path(&self, model: &str) -> PathBuf {
        self.models_dir.join(model).join("repo")
    }

    fn validate(self) -> Result<Self> {
        if self.update_command.first().is_none_or(|p| p.trim().is_empty()) {
            return Err(Error::ConfigParse {
                message: "update_command must name a program".to_string(),
                hint: Some("e.g. update_command: [\"python3\", \"teltochronicle.py\"]".to_string()),
            });
        }
        if self.commit_message.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "commit_message must not be empty".to_string(),
                hint: None,
            });
        }
        if self.remote.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "remote must not be empty".to_string(),
                hint: None,
            });
        }
        Ok(self)
    }
}

/// Parses settings from YAML text.
pub fn parse(yaml: &str) -> Result<Settings> {
    // an empty or comment-only file means "all defaults"
    if yaml.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "valid keys are update_command, commit_message, protected_branches, remote, models_dir"
                .to_string(),
        ),
    })?;
    settings.validate()
}

/// Loads settings for the superproject at `root`.
///
/// With `explicit` set, that file must exist. Otherwise
/// `<root>/.chronicle.yaml` is read if present and defaults are used if not.
pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Settings> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = root.join(defaults::SETTINGS_FILE);
            if !path.exists() {
                log::debug!("no {} in {}, using defaults", defaults::SETTINGS_FILE, root.display());
                return Ok(Settings::default());
            }
            path
        }
    };
    log::debug!("loading settings from {}", path.display());
    let text = std::fs::read_to_string(&path)?;
    parse(&text)
}
