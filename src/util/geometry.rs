// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the pure math behind the frame widget: clamping,
//! cover-fit scaling of an image into a frame and the pan range that
//! scaling leaves for the image.

/// A 2D position (or offset) in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate this position by an offset.
    pub fn offset_by(self, delta: Position) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Which axis of the image is scaled to exactly 100% of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillAxis {
    /// Image width equals frame width; height overflows.
    Width,
    /// Image height equals frame height; width overflows.
    Height,
}

/// Legal range for the image offset inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PanBounds {
    /// Clamp an offset into these bounds, axis by axis.
    pub fn clamp(&self, offset: Position) -> Position {
        Position::new(
            clamp(offset.x, self.left, self.right),
            clamp(offset.y, self.top, self.bottom),
        )
    }

    /// Whether the offset already lies inside the bounds.
    pub fn contains(&self, offset: Position) -> bool {
        self.clamp(offset) == offset
    }
}

/// Result of fitting an image into a frame under the cover policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub axis: FillAxis,
    /// Size the image is drawn at, before panning.
    pub display_size: Size,
    pub pan_bounds: PanBounds,
}

/// Standard clamp that tolerates an inverted range.
///
/// When `min > max` the range collapses to the single point `min`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return min;
    }
    value.max(min).min(max)
}

/// Scale an image of `natural` size so that it fully covers `frame`.
///
/// A relatively wider image fills the frame height and may slide
/// horizontally; otherwise it fills the width and may slide vertically.
/// The offset range on the free axis is `[frame - scaled, 0]`, so the image
/// can never expose a gap along either frame edge.
///
/// A degenerate natural size (zero or negative) yields a frame-sized image
/// with a zero pan range.
pub fn cover_fit(frame: Size, natural: Size) -> CoverFit {
    if natural.is_degenerate() || frame.is_degenerate() {
        return CoverFit {
            axis: FillAxis::Width,
            display_size: frame,
            pan_bounds: PanBounds::default(),
        };
    }

    if natural.aspect_ratio() > frame.aspect_ratio() {
        let scaled_width = natural.width * (frame.height / natural.height);
        CoverFit {
            axis: FillAxis::Height,
            display_size: Size::new(scaled_width, frame.height),
            pan_bounds: PanBounds {
                left: frame.width - scaled_width,
                top: 0.0,
                right: 0.0,
                bottom: 0.0,
            },
        }
    } else {
        let scaled_height = natural.height * (frame.width / natural.width);
        CoverFit {
            axis: FillAxis::Width,
            display_size: Size::new(frame.width, scaled_height),
            pan_bounds: PanBounds {
                left: 0.0,
                top: frame.height - scaled_height,
                right: 0.0,
                bottom: 0.0,
            },
        }
    }
}
