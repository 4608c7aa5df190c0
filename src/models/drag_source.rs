// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Candidate image carried by a drag from the gallery.

use super::gallery::ImageId;
use crate::util::geometry::Size;

/// Image being dragged out of the gallery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub id: ImageId,
    /// Natural size, if the gallery has decoded it already
    pub natural_size: Option<Size>,
}

/// Holds the gallery drag candidate and whether the frame previews it.
#[derive(Debug, Clone, Default)]
pub struct DragSourceRegistry {
    candidate: Option<Candidate>,
    previewing: bool,
}

impl DragSourceRegistry {
    pub fn begin_drag(&mut self, candidate: Candidate) {
        self.candidate = Some(candidate);
        self.previewing = false;
    }

    pub fn end_drag(&mut self) {
        self.candidate = None;
        self.previewing = false;
    }

    pub fn candidate(&self) -> Option<Candidate> {
        self.candidate
    }

    pub fn set_previewing(&mut self, previewing: bool) {
        self.previewing = previewing;
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing && self.candidate.is_some()
    }

    /// The candidate to display in place of the active image, if any.
    pub fn preview(&self) -> Option<Candidate> {
        self.candidate.filter(|_| self.previewing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_requires_candidate_and_flag() {
        let mut registry = DragSourceRegistry::default();
        registry.set_previewing(true);
        assert!(registry.preview().is_none());
        assert!(!registry.is_previewing());

        let candidate = Candidate { id: ImageId(4), natural_size: None };
        registry.begin_drag(candidate);
        assert!(registry.preview().is_none());

        registry.set_previewing(true);
        assert_eq!(registry.preview(), Some(candidate));

        registry.end_drag();
        assert!(registry.preview().is_none());
        assert!(registry.candidate().is_none());
    }
}
