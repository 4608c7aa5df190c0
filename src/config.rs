// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings can be loaded from a YAML or JSON file (see
//! [`crate::io::serialization::load_settings`]); any field left out keeps
//! its default.

use crate::models::frame::FrameState;
use crate::util::geometry::Size;
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Widget and artboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub artboard_width: f32,
    pub artboard_height: f32,
    pub min_frame_width: f32,
    pub min_frame_height: f32,
    pub initial_frame_width: f32,
    pub initial_frame_height: f32,
    /// Opacity of a gallery image previewed during drag-over (0.0 to 1.0)
    pub preview_opacity: f32,
    /// Side length of the square resize handles, in pixels
    pub handle_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            artboard_width: 800.0,
            artboard_height: 600.0,
            min_frame_width: 100.0,
            min_frame_height: 100.0,
            initial_frame_width: 400.0,
            initial_frame_height: 300.0,
            preview_opacity: 0.8,
            handle_size: 10.0,
        }
    }
}

impl Settings {
    pub fn artboard(&self) -> Size {
        Size::new(self.artboard_width, self.artboard_height)
    }

    /// Check that the sizes describe a frame that fits the artboard.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.artboard_width > 0.0 && self.artboard_height > 0.0,
            "artboard size must be positive, got {}x{}",
            self.artboard_width,
            self.artboard_height
        );
        ensure!(
            self.min_frame_width > 0.0 && self.min_frame_height > 0.0,
            "minimum frame size must be positive, got {}x{}",
            self.min_frame_width,
            self.min_frame_height
        );
        ensure!(
            self.min_frame_width <= self.artboard_width
                && self.min_frame_height <= self.artboard_height,
            "minimum frame size {}x{} exceeds the artboard",
            self.min_frame_width,
            self.min_frame_height
        );
        ensure!(
            (self.min_frame_width..=self.artboard_width).contains(&self.initial_frame_width)
                && (self.min_frame_height..=self.artboard_height)
                    .contains(&self.initial_frame_height),
            "initial frame size {}x{} is outside the allowed range",
            self.initial_frame_width,
            self.initial_frame_height
        );
        ensure!(
            (0.0..=1.0).contains(&self.preview_opacity),
            "preview opacity must be between 0 and 1, got {}",
            self.preview_opacity
        );
        ensure!(
            self.handle_size > 0.0,
            "handle size must be positive, got {}",
            self.handle_size
        );
        Ok(())
    }

    /// Build the initial, centered frame.
    pub fn initial_frame(&self) -> FrameState {
        FrameState::new(
            self.artboard(),
            Size::new(self.min_frame_width, self.min_frame_height),
            Size::new(self.initial_frame_width, self.initial_frame_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::geometry::Position;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());

        let frame = settings.initial_frame();
        assert_eq!(frame.position(), Position::new(200.0, 150.0));
        assert_eq!(frame.size(), Size::new(400.0, 300.0));
    }

    #[test]
    fn test_rejects_oversized_minimum() {
        let settings = Settings {
            min_frame_width: 900.0,
            initial_frame_width: 900.0,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds the artboard"));
    }

    #[test]
    fn test_rejects_initial_below_minimum() {
        let settings = Settings {
            initial_frame_height: 50.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_opacity() {
        let settings = Settings {
            preview_opacity: 1.5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
