// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Settings serialization and deserialization.
//!
//! This module handles reading settings in YAML and JSON formats, chosen
//! by file extension.

use crate::config::Settings;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Import settings from YAML format.
pub fn import_yaml(path: &Path) -> Result<Settings> {
    let yaml = std::fs::read_to_string(path)?;
    let settings = serde_yaml::from_str(&yaml)?;
    Ok(settings)
}

/// Import settings from JSON format.
pub fn import_json(path: &Path) -> Result<Settings> {
    let json = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&json)?;
    Ok(settings)
}

/// Load and validate settings, picking the format from the extension.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let extension = path.extension().and_then(|s| s.to_str());
    let settings = match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported settings file extension: {:?}", extension),
    }
    .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    settings
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    log::info!("Loaded settings from {}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("framecrop-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let path = temp_path("partial.yaml");
        std::fs::write(&path, "artboard_width: 1024\npreview_opacity: 0.5\n").unwrap();

        let settings = load_settings(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.artboard_width, 1024.0);
        assert_eq!(settings.preview_opacity, 0.5);
        assert_eq!(settings.artboard_height, Settings::default().artboard_height);
    }

    #[test]
    fn test_full_json_file() {
        let path = temp_path("settings.json");
        let settings = Settings {
            initial_frame_width: 250.0,
            ..Settings::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();
        let loaded = load_settings(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let path = temp_path("invalid.yml");
        std::fs::write(&path, "min_frame_width: 2000\n").unwrap();
        let result = load_settings(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = load_settings(Path::new("settings.toml")).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }
}
