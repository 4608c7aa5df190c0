// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fit of the active image inside the frame.
//!
//! Tracks the active image source, its natural size once decoding has
//! finished, the cover fit derived from the frame size and the current pan
//! offset of the image inside the frame.

use super::gallery::ImageId;
use crate::util::geometry::{cover_fit, CoverFit, PanBounds, Position, Size};

/// Fit and pan state for the active image.
#[derive(Debug, Clone, Default)]
pub struct ImageFitState {
    /// Active image source, if any
    source: Option<ImageId>,
    /// Natural size of `source`; `None` until its decode resolves
    natural_size: Option<Size>,
    /// Cover fit for the current frame size
    fit: Option<CoverFit>,
    /// Image translation relative to its fitted position
    offset: Position,
}

impl ImageFitState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<ImageId> {
        self.source
    }

    pub fn natural_size(&self) -> Option<Size> {
        self.natural_size
    }

    pub fn fit(&self) -> Option<CoverFit> {
        self.fit
    }

    pub fn pan_bounds(&self) -> Option<PanBounds> {
        self.fit.map(|fit| fit.pan_bounds)
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    /// Replace the active source.
    ///
    /// The offset is reset and the natural size becomes unknown until
    /// [`ImageFitState::on_image_loaded`] delivers it for this source.
    pub fn on_image_source_changed(&mut self, source: Option<ImageId>) {
        self.source = source;
        self.natural_size = None;
        self.fit = None;
        self.offset = Position::ZERO;
    }

    /// Accept a decoded natural size.
    ///
    /// Results for anything other than the current source are stale and
    /// ignored; returns whether the size was applied.
    pub fn on_image_loaded(
        &mut self,
        source: ImageId,
        natural_size: Size,
        frame_size: Size,
        cropping: bool,
    ) -> bool {
        if self.source != Some(source) {
            log::debug!(
                "Discarding stale decode result for {:?} (current {:?})",
                source,
                self.source
            );
            return false;
        }
        self.natural_size = Some(natural_size);
        self.recompute_fit(frame_size, cropping)
    }

    /// Re-derive the fit for `frame_size`.
    ///
    /// Outside of cropping the offset is clamped into the new pan bounds.
    /// Returns `false` while the natural size is unknown.
    pub fn recompute_fit(&mut self, frame_size: Size, cropping: bool) -> bool {
        let Some(natural_size) = self.natural_size else {
            return false;
        };
        let fit = cover_fit(frame_size, natural_size);
        self.fit = Some(fit);
        if !cropping {
            self.offset = fit.pan_bounds.clamp(self.offset);
        }
        true
    }

    /// Set the pan offset, clamped to the pan bounds unless `free`.
    pub fn pan(&mut self, offset: Position, free: bool) {
        self.offset = match (free, self.pan_bounds()) {
            (false, Some(bounds)) => bounds.clamp(offset),
            _ => offset,
        };
    }

    /// Clamp the current offset into the pan bounds, if they are known.
    pub fn clamp_offset(&mut self) {
        if let Some(bounds) = self.pan_bounds() {
            if !bounds.contains(self.offset) {
                log::debug!("Pan offset {:?} snapped back into {:?}", self.offset, bounds);
                self.offset = bounds.clamp(self.offset);
            }
        }
    }
}
