pub mod commit;
pub mod config;
pub mod issues;
pub mod setup;

use std::path::Path;

use crate::config::Configuration;
use crate::error::{AppError, AppResult};

/// Loads the config file and insists every required field is filled in.
fn load_complete_config(path: &Path) -> AppResult<Configuration> {
    let config = Configuration::load(path)?.ok_or_else(|| {
        AppError::Configuration(format!(
            "config not found at {}. Run `jcommit setup` to get started.",
            path.display()
        ))
    })?;

    let missing = config.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Configuration(format!(
            "incomplete config, required fields missing: {}. Run `jcommit setup` to update it.",
            missing.join(", ")
        )));
    }
    Ok(config)
}
