// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation config loading.
//!
//! This module reads [`AnnotationConfig`] from YAML and JSON files. Missing
//! fields fall back to their defaults.

use crate::models::config::AnnotationConfig;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Load an annotation config from YAML.
pub fn load_yaml(path: &Path) -> Result<AnnotationConfig> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = serde_yaml::from_str(&yaml)?;
    Ok(config)
}

/// Load an annotation config from JSON.
pub fn load_json(path: &Path) -> Result<AnnotationConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = serde_json::from_str(&json)?;
    Ok(config)
}

/// Load an annotation config, picking the format from the file extension.
pub fn load(path: &Path) -> Result<AnnotationConfig> {
    let extension = path.extension().and_then(|s| s.to_str());
    let config = match extension {
        Some("yaml") | Some("yml") => load_yaml(path)?,
        Some("json") => load_json(path)?,
        _ => bail!("Unsupported config extension: {:?}", extension),
    };

    log::info!(
        "Loaded annotation config from {} (mode {:?}, radius {})",
        path.display(),
        config.interpolation_mode,
        config.collision_radius
    );
    Ok(config)
}
