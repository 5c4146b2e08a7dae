//! Registering a device model's SDK history repository as a submodule.
//!
//! The update script materializes `models/<MODEL>/repo` as a plain git
//! repository. `add-model` attaches the published URL as that repository's
//! `origin` and then records it in the superproject as a submodule at the
//! same path. All parameters are validated before any git command runs;
//! the URL itself is not contacted beforehand.

use std::path::Component;
use std::path::Path;

use log::info;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::git;
use crate::output;

/// Checks that `model` is usable as a single directory name.
pub fn validate_model(model: Option<&str>) -> Result<&str> {
    let model = model.map(str::trim).unwrap_or_default();
    if model.is_empty() {
        return Err(Error::MissingParameter {
            name: "MODEL".to_string(),
            hint: Some("pass --model <MODEL>, e.g. --model RUT950".to_string()),
        });
    }
    let mut components = Path::new(model).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !model.contains(['/', '\\']) => Ok(model),
        _ => Err(Error::InvalidParameter {
            name: "MODEL".to_string(),
            message: format!("'{}' must be a plain directory name", model),
        }),
    }
}

pub fn validate_repo_url(url: Option<&str>) -> Result<&str> {
    let url = url.map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return Err(Error::MissingParameter {
            name: "REPO_URL".to_string(),
            hint: Some("pass --repo-url <URL> of the model's SDK history repository".to_string()),
        });
    }
    Ok(url)
}

/// Adds `origin` to the model's repository and registers it as a submodule.
pub fn add_model(ctx: &Context<'_>, model: Option<&str>, repo_url: Option<&str>) -> Result<()> {
    let model = validate_model(model)?;
    let url = validate_repo_url(repo_url)?;

    let relative = ctx.settings.model_repo_path(model);
    let dir = ctx.root().join(&relative);
    if !dir.is_dir() {
        return Err(Error::RepositoryMissing {
            path: relative,
            hint: Some(format!("run `chronicle update {}` first", model)),
        });
    }
    // git wants forward slashes in submodule paths on every platform
    let submodule_path = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    info!("registering {} from {}", submodule_path, url);
    output::step(&ctx.output, &format!("Adding origin {} to {}", url, submodule_path));
    ctx.runner.run_checked(&git::remote_add(&dir, "origin", url))?;

    output::step(&ctx.output, &format!("Registering submodule {}", submodule_path));
    ctx.runner
        .run_checked(&git::submodule_add(ctx.root(), url, &submodule_path))?;

    output::done(&ctx.output, &format!("Model {} added", model));
    Ok(())
}
