// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the frame widget, the gallery and the
//! background image loader, and runs the upload and decode collaborators
//! the widget asks for.

use crate::config::Settings;
use crate::io::media::{validate_image, ImageLoader};
use crate::models::drag_source::Candidate;
use crate::models::gallery::{Gallery, ImageId};
use crate::models::interaction::{FrameWidget, WidgetEffect, WidgetEvent};
use crate::ui::{canvas, gallery};
use crate::util::geometry::Size;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main application state.
pub struct FramecropApp {
    settings: Settings,

    /// Frame, image fit and interaction mode
    widget: FrameWidget,

    /// Uploaded images, newest first
    gallery: Gallery,

    /// Textures for decoded gallery images
    textures: HashMap<ImageId, egui::TextureHandle>,

    /// Background decoder for uploads
    loader: ImageLoader,
}

impl FramecropApp {
    /// Create a new application instance.
    pub fn new(settings: Settings) -> Self {
        Self {
            widget: FrameWidget::new(settings.initial_frame()),
            settings,
            gallery: Gallery::new(),
            textures: HashMap::new(),
            loader: ImageLoader::new(),
        }
    }

    /// Feed an event to the widget and run whatever it asks for.
    fn dispatch(&mut self, event: WidgetEvent) {
        if let Some(effect) = self.widget.handle(event) {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: WidgetEffect) {
        match effect {
            WidgetEffect::ResolveSize(id) => {
                // Sizes of already decoded images are known; others arrive via the loader
                if let Some(natural_size) = self.gallery.natural_size(id) {
                    self.dispatch(WidgetEvent::ImageLoaded { id, natural_size });
                }
            }
            WidgetEffect::Upload(file) => match file.path {
                Some(path) => {
                    if let Some(id) = self.upload(&path, &file.mime) {
                        self.dispatch(WidgetEvent::SelectImage(Some(id)));
                    }
                }
                None => log::warn!("Dropped file has no path, ignoring"),
            },
        }
    }

    /// Validate a file, add it to the gallery and start decoding it.
    ///
    /// Files that are not images are dropped without any state change.
    fn upload(&mut self, path: &Path, mime: &str) -> Option<ImageId> {
        if let Err(e) = validate_image(path, mime) {
            log::warn!("Ignoring upload: {}", e);
            return None;
        }

        let id = self.gallery.add(path);
        self.loader.request(id, path.to_path_buf());
        log::info!("Uploaded {} as {:?}, gallery size: {}", path.display(), id, self.gallery.len());
        Some(id)
    }

    /// Upload files picked in the file dialog; the last valid one becomes active.
    fn upload_files(&mut self, paths: Vec<PathBuf>) {
        for path in paths {
            if let Some(id) = self.upload(&path, "") {
                self.dispatch(WidgetEvent::SelectImage(Some(id)));
            }
        }
    }

    /// Turn finished decodes into textures and widget events.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        for (id, result) in self.loader.poll() {
            match result {
                Ok(loaded) => {
                    let natural_size = Size::new(loaded.width as f32, loaded.height as f32);
                    if !self.gallery.mark_ready(id, natural_size) {
                        continue;
                    }

                    let size = [loaded.width as usize, loaded.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                    let texture = ctx.load_texture(
                        format!("gallery_image_{}", id.0),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.textures.insert(id, texture);

                    self.dispatch(WidgetEvent::ImageLoaded { id, natural_size });
                }
                Err(e) => {
                    log::error!("Failed to load image: {:#}", e);
                    self.gallery.remove(id);
                    self.textures.remove(&id);
                    self.dispatch(WidgetEvent::ImageFailed(id));
                }
            }
        }
    }

    /// Mirror egui's drag-and-drop payload into the widget's drag source.
    fn sync_gallery_drag(&mut self, ctx: &egui::Context) {
        let payload = egui::DragAndDrop::payload::<gallery::GalleryPayload>(ctx);
        let candidate = self.widget.drag_candidate().map(|c| c.id);

        match payload {
            // A payload can outlive its entry when the decode fails mid-drag
            Some(payload) if self.gallery.get(payload.0).is_none() => {
                if candidate.is_some() {
                    self.dispatch(WidgetEvent::GalleryDragEnd);
                }
            }
            Some(payload) if candidate != Some(payload.0) => {
                let id = payload.0;
                self.dispatch(WidgetEvent::GalleryDragStart(Candidate {
                    id,
                    natural_size: self.gallery.natural_size(id),
                }));
            }
            None if candidate.is_some() => self.dispatch(WidgetEvent::GalleryDragEnd),
            _ => {}
        }
    }
}

impl eframe::App for FramecropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        // Keep polling while decodes are in flight
        if self.loader.is_busy() {
            ctx.request_repaint();
        }

        self.sync_gallery_drag(ctx);

        let gallery_action = egui::SidePanel::left("gallery")
            .resizable(false)
            .exact_width(232.0)
            .show(ctx, |ui| {
                gallery::show(ui, &self.gallery, &self.textures, self.widget.active_image())
            })
            .inner;

        match gallery_action {
            gallery::GalleryAction::Upload => {
                // Open native file picker
                if let Some(paths) = rfd::FileDialog::new()
                    .add_filter("Images", &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "tif"])
                    .pick_files()
                {
                    self.upload_files(paths);
                }
            }
            gallery::GalleryAction::Select(id) => {
                self.dispatch(WidgetEvent::SelectImage(Some(id)));
            }
            gallery::GalleryAction::None => {}
        }

        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                canvas::show(ui, &self.widget, &self.textures, &self.settings)
            })
            .inner;

        for event in events {
            self.dispatch(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interaction::{DragPayload, FileDrop, InteractionMode};

    #[test]
    fn test_non_image_upload_is_ignored() {
        let mut app = FramecropApp::new(Settings::default());
        app.dispatch(WidgetEvent::Drop(DragPayload::FileDrop(FileDrop {
            path: Some(PathBuf::from("/tmp/notes.txt")),
            mime: "text/plain".to_string(),
        })));

        assert!(app.gallery.is_empty());
        assert_eq!(app.widget.active_image(), None);
        assert_eq!(app.widget.mode(), InteractionMode::Idle);
    }

    #[test]
    fn test_image_upload_becomes_active() {
        let mut app = FramecropApp::new(Settings::default());
        app.upload_files(vec![
            PathBuf::from("/tmp/first.png"),
            PathBuf::from("/tmp/readme.md"),
            PathBuf::from("/tmp/second.jpg"),
        ]);

        let names: Vec<&str> = app.gallery.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["second.jpg", "first.png"]);
        assert_eq!(app.widget.active_image(), app.gallery.iter().next().map(|e| e.id));
    }

    #[test]
    fn test_gallery_drag_follows_payload() {
        let ctx = egui::Context::default();
        let mut app = FramecropApp::new(Settings::default());
        let id = app.gallery.add(Path::new("/tmp/drag.png"));
        app.gallery.mark_ready(id, Size::new(640.0, 480.0));

        egui::DragAndDrop::set_payload(&ctx, gallery::GalleryPayload(id));
        app.sync_gallery_drag(&ctx);
        let candidate = app.widget.drag_candidate().unwrap();
        assert_eq!(candidate.id, id);
        assert_eq!(candidate.natural_size, Some(Size::new(640.0, 480.0)));

        egui::DragAndDrop::clear_payload(&ctx);
        app.sync_gallery_drag(&ctx);
        assert!(app.widget.drag_candidate().is_none());
    }

    #[test]
    fn test_failed_decode_during_drag_drops_candidate() {
        let ctx = egui::Context::default();
        let mut app = FramecropApp::new(Settings::default());
        let id = app.gallery.add(Path::new("/tmp/broken.png"));

        egui::DragAndDrop::set_payload(&ctx, gallery::GalleryPayload(id));
        app.sync_gallery_drag(&ctx);
        assert_eq!(app.widget.drag_candidate().map(|c| c.id), Some(id));

        app.gallery.remove(id);
        app.dispatch(WidgetEvent::ImageFailed(id));

        // The payload is still live until the pointer is released
        for _ in 0..2 {
            app.sync_gallery_drag(&ctx);
            assert!(app.widget.drag_candidate().is_none());
            assert!(app.widget.display().is_none());
        }
    }

    #[test]
    fn test_resolve_uses_known_size() {
        let mut app = FramecropApp::new(Settings::default());
        let id = app.gallery.add(Path::new("/tmp/known.png"));
        app.gallery.mark_ready(id, Size::new(1200.0, 800.0));

        app.dispatch(WidgetEvent::SelectImage(Some(id)));
        assert_eq!(app.widget.image().natural_size(), Some(Size::new(1200.0, 800.0)));
        assert!(app.widget.image().fit().is_some());
    }
}
