// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Gallery of uploaded images.
//!
//! This module keeps the list of images the user has uploaded during the
//! session, newest first, together with their decode status.

use crate::util::geometry::Size;
use std::path::{Path, PathBuf};

/// Session-unique identity of an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

/// Decode progress of a gallery image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecodeStatus {
    Pending,
    Ready { natural_size: Size },
}

/// A single uploaded image.
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    pub id: ImageId,
    pub path: PathBuf,
    pub name: String,
    pub status: DecodeStatus,
}

impl GalleryEntry {
    pub fn natural_size(&self) -> Option<Size> {
        match self.status {
            DecodeStatus::Ready { natural_size } => Some(natural_size),
            DecodeStatus::Pending => None,
        }
    }
}

/// Ordered list of uploaded images, newest first.
#[derive(Debug, Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
    next_id: u64,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image at the front of the gallery and return its identity.
    pub fn add(&mut self, path: &Path) -> ImageId {
        self.next_id += 1;
        let id = ImageId(self.next_id);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| format!("image {}", id.0));
        self.entries.insert(
            0,
            GalleryEntry {
                id,
                path: path.to_path_buf(),
                name,
                status: DecodeStatus::Pending,
            },
        );
        id
    }

    pub fn get(&self, id: ImageId) -> Option<&GalleryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn natural_size(&self, id: ImageId) -> Option<Size> {
        self.get(id).and_then(GalleryEntry::natural_size)
    }

    /// Record the natural size once decoding finished.
    pub fn mark_ready(&mut self, id: ImageId, natural_size: Size) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.status = DecodeStatus::Ready { natural_size };
                true
            }
            None => false,
        }
    }

    /// Remove an entry, e.g. after its decode failed.
    pub fn remove(&mut self, id: ImageId) -> Option<GalleryEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GalleryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut gallery = Gallery::new();
        let a = gallery.add(Path::new("/tmp/a.png"));
        let b = gallery.add(Path::new("/tmp/b.jpg"));

        let ids: Vec<ImageId> = gallery.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b, a]);
        assert_eq!(gallery.get(b).unwrap().name, "b.jpg");
    }

    #[test]
    fn test_ids_are_unique_after_removal() {
        let mut gallery = Gallery::new();
        let a = gallery.add(Path::new("a.png"));
        gallery.remove(a);
        let b = gallery.add(Path::new("a.png"));
        assert_ne!(a, b);
        assert_eq!(gallery.len(), 1);
    }

    #[test]
    fn test_mark_ready_records_size() {
        let mut gallery = Gallery::new();
        let id = gallery.add(Path::new("photo.png"));
        assert_eq!(gallery.natural_size(id), None);

        assert!(gallery.mark_ready(id, Size::new(640.0, 480.0)));
        assert_eq!(gallery.natural_size(id), Some(Size::new(640.0, 480.0)));
        assert!(!gallery.mark_ready(ImageId(99), Size::new(1.0, 1.0)));
    }

    #[test]
    fn test_remove_missing_entry() {
        let mut gallery = Gallery::new();
        assert!(gallery.remove(ImageId(7)).is_none());
        assert!(gallery.is_empty());
    }
}
