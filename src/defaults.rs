//! Default values for chronicle settings.
//!
//! Centralized here so the settings file, the CLI and the tests agree.

/// File name of the optional settings file at the superproject root.
pub const SETTINGS_FILE: &str = ".chronicle.yaml";

/// Message used by `commit` for metadata/SDK updates.
pub const COMMIT_MESSAGE: &str = "Update firmware metadata and SDKs";

/// Remote every submodule is pushed to and reset against.
pub const REMOTE: &str = "origin";

/// Directory holding one subdirectory per device model.
pub const MODELS_DIR: &str = "models";

/// Branches the pull workflow never fast-forwards.
pub fn protected_branches() -> Vec<String> {
    vec!["master".to_string(), "stable".to_string()]
}

/// The metadata/SDK fetch script and its interpreter.
pub fn update_command() -> Vec<String> {
    vec!["python3".to_string(), "teltochronicle.py".to_string()]
}
