// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file validation and loading.
//!
//! This module checks that uploaded files are images, decodes them on
//! background threads and converts them to RGBA pixels suitable for
//! display in egui.

use crate::models::gallery::ImageId;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Decoded image ready to upload as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Check that a file looks like an image.
///
/// A known MIME type must start with `image/`; without one the extension
/// must name a raster format the `image` crate understands.
pub fn validate_image(path: &Path, mime: &str) -> Result<()> {
    if !mime.is_empty() {
        if mime.starts_with("image/") {
            return Ok(());
        }
        bail!("{} is not an image ({})", path.display(), mime);
    }

    match image::ImageFormat::from_path(path) {
        Ok(format) if format.reading_enabled() => Ok(()),
        _ => bail!("{} is not a supported image file", path.display()),
    }
}

/// Decode an image file into RGBA pixels.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path).with_context(|| format!("Failed to decode {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        bail!("{} has no pixels", path.display());
    }
    Ok(LoadedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Background image decoder.
///
/// Every request runs on its own thread; results arrive on a single
/// channel tagged with the image they belong to and are collected with
/// [`ImageLoader::poll`].
pub struct ImageLoader {
    sender: Sender<(ImageId, Result<LoadedImage>)>,
    receiver: Receiver<(ImageId, Result<LoadedImage>)>,
    in_flight: usize,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Start decoding `path` in the background.
    pub fn request(&mut self, id: ImageId, path: PathBuf) {
        let sender = self.sender.clone();
        self.in_flight += 1;

        std::thread::spawn(move || {
            let result = load_image(&path);
            if let Ok(ref loaded) = result {
                log::info!("Decoded image: {} ({}x{})", path.display(), loaded.width, loaded.height);
            }
            let _ = sender.send((id, result));
        });
    }

    /// Collect every result that has arrived since the last poll.
    pub fn poll(&mut self) -> Vec<(ImageId, Result<LoadedImage>)> {
        let results: Vec<_> = self.receiver.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(results.len());
        results
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_validate_by_mime() {
        assert!(validate_image(Path::new("upload"), "image/png").is_ok());
        assert!(validate_image(Path::new("notes.png"), "text/plain").is_err());
    }

    #[test]
    fn test_validate_by_extension() {
        assert!(validate_image(Path::new("/tmp/photo.JPG"), "").is_ok());
        assert!(validate_image(Path::new("/tmp/photo.png"), "").is_ok());
        assert!(validate_image(Path::new("/tmp/readme.txt"), "").is_err());
        assert!(validate_image(Path::new("/tmp/no_extension"), "").is_err());
    }

    #[test]
    fn test_loader_decodes_in_background() {
        let path = std::env::temp_dir().join(format!("framecrop-{}-tiny.png", std::process::id()));
        image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let mut loader = ImageLoader::new();
        loader.request(ImageId(1), path.clone());
        assert!(loader.is_busy());

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut results = Vec::new();
        while results.is_empty() && Instant::now() < deadline {
            results = loader.poll();
            std::thread::sleep(Duration::from_millis(10));
        }
        std::fs::remove_file(&path).ok();

        assert_eq!(results.len(), 1);
        let (id, result) = results.pop().unwrap();
        assert_eq!(id, ImageId(1));
        let loaded = result.unwrap();
        assert_eq!((loaded.width, loaded.height), (3, 2));
        assert_eq!(loaded.pixels.len(), 3 * 2 * 4);
        assert!(!loader.is_busy());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load_image(Path::new("/definitely/not/here.png")).is_err());
    }
}
