// src/config/validate.rs

use anyhow::{Result, anyhow};

use crate::config::model::RawConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - the data path is non-empty
/// - layout spacing and level gap are positive
/// - the collision retry budget is at least 1
/// - padding and viewport floors are non-negative
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.data.path.trim().is_empty() {
        return Err(anyhow!("[data].path must not be empty"));
    }

    if cfg.layout.spacing <= 0.0 {
        return Err(anyhow!(
            "[layout].spacing must be > 0 (got {})",
            cfg.layout.spacing
        ));
    }

    if cfg.layout.level_gap <= 0.0 {
        return Err(anyhow!(
            "[layout].level_gap must be > 0 (got {})",
            cfg.layout.level_gap
        ));
    }

    if cfg.layout.collision_retries == 0 {
        return Err(anyhow!("[layout].collision_retries must be >= 1 (got 0)"));
    }

    if cfg.layout.padding < 0.0 {
        return Err(anyhow!(
            "[layout].padding must be >= 0 (got {})",
            cfg.layout.padding
        ));
    }

    if cfg.layout.viewport_width < 0.0 || cfg.layout.viewport_height < 0.0 {
        return Err(anyhow!("[layout] viewport floors must be >= 0"));
    }

    Ok(())
}
