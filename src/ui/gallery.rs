// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Upload sidebar and thumbnail gallery.
//!
//! This module provides the sidebar with the upload button and the
//! thumbnails of every uploaded image. Thumbnails can be clicked to make
//! them active or dragged onto the frame.

use crate::models::gallery::{Gallery, ImageId};
use std::collections::HashMap;

const THUMBNAIL_SIZE: f32 = 96.0;

/// Drag-and-drop payload carried by a thumbnail drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryPayload(pub ImageId);

/// Result of sidebar interaction.
pub enum GalleryAction {
    None,
    Upload,
    Select(ImageId),
}

/// Display the sidebar with the upload button and thumbnails.
pub fn show(
    ui: &mut egui::Ui,
    gallery: &Gallery,
    textures: &HashMap<ImageId, egui::TextureHandle>,
    active: Option<ImageId>,
) -> GalleryAction {
    let mut action = GalleryAction::None;

    ui.add_space(8.0);
    if ui
        .add_sized([ui.available_width(), 32.0], egui::Button::new("Upload files"))
        .clicked()
    {
        action = GalleryAction::Upload;
    }
    ui.add_space(4.0);
    ui.label(egui::RichText::new("Click or drag an image to the frame.").weak());
    ui.separator();

    if gallery.is_empty() {
        ui.label(egui::RichText::new("No images uploaded yet.").italics().weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for entry in gallery.iter() {
                let drag_id = egui::Id::new(("gallery_thumbnail", entry.id));
                let thumbnail = ui
                    .dnd_drag_source(drag_id, GalleryPayload(entry.id), |ui| {
                        match textures.get(&entry.id) {
                            Some(texture) => ui.add(
                                egui::Image::from_texture(egui::load::SizedTexture::from_handle(
                                    texture,
                                ))
                                .fit_to_exact_size(egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE))
                                .sense(egui::Sense::click()),
                            ),
                            None => ui.add_sized(
                                [THUMBNAIL_SIZE, THUMBNAIL_SIZE],
                                egui::Spinner::new(),
                            ),
                        }
                    })
                    .inner
                    .on_hover_text(format!("{}\n{}", entry.name, entry.path.display()));

                if active == Some(entry.id) {
                    ui.painter().rect_stroke(
                        thumbnail.rect.expand(2.0),
                        2.0,
                        egui::Stroke::new(2.0, ui.visuals().selection.stroke.color),
                    );
                }
                if thumbnail.clicked() {
                    action = GalleryAction::Select(entry.id);
                }
            }
        });
    });

    action
}
