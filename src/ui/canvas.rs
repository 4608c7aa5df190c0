// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Artboard canvas with the movable, resizable image frame.
//!
//! This module draws the artboard, the frame and its image, and turns egui
//! pointer and drag-and-drop input into [`WidgetEvent`]s for the frame
//! widget. It never mutates the widget itself.

use crate::config::Settings;
use crate::models::frame::ResizeDirection;
use crate::models::gallery::ImageId;
use crate::models::interaction::{
    Display, DragPayload, FileDrop, FrameWidget, InteractionMode, WidgetEvent,
};
use crate::ui::gallery::GalleryPayload;
use crate::util::geometry::Position;
use std::collections::HashMap;

const FRAME_ACCENT: egui::Color32 = egui::Color32::from_rgb(110, 85, 255);
const DROP_ACCENT: egui::Color32 = egui::Color32::from_rgb(60, 200, 120);

/// Display the artboard and collect the events produced by user input.
pub fn show(
    ui: &mut egui::Ui,
    widget: &FrameWidget,
    textures: &HashMap<ImageId, egui::TextureHandle>,
    settings: &Settings,
) -> Vec<WidgetEvent> {
    let mut events = Vec::new();
    let cropping = widget.is_cropping();

    let artboard = widget.artboard();
    let available = ui.available_rect_before_wrap();
    let board_rect = egui::Rect::from_center_size(
        available.center(),
        egui::vec2(artboard.width, artboard.height),
    );
    ui.allocate_rect(board_rect, egui::Sense::hover());
    ui.painter()
        .rect_filled(board_rect, 0.0, egui::Color32::from_gray(245));

    let frame = widget.frame_rect();
    let frame_rect = egui::Rect::from_min_max(
        to_screen(board_rect, frame.position),
        to_screen(board_rect, Position::new(frame.right(), frame.bottom())),
    );

    // Registered first so the frame, image and handles sit on top of it
    if cropping {
        let screen = ui.ctx().screen_rect();
        let scrim = ui.interact(screen, ui.id().with("crop_scrim"), egui::Sense::click());
        ui.painter()
            .with_clip_rect(screen)
            .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(160));
        if scrim.clicked() {
            events.push(WidgetEvent::ScrimClick);
        }
    }

    let mut body = ui.interact(
        frame_rect,
        ui.id().with("frame_body"),
        egui::Sense::click_and_drag(),
    );
    if !cropping {
        body = body.on_hover_cursor(egui::CursorIcon::Move);
    }
    if body.double_clicked() {
        events.push(WidgetEvent::DoubleClick);
    }
    push_drag_events(
        ui,
        &body,
        &mut events,
        WidgetEvent::MoveStart,
        WidgetEvent::MoveDelta,
        WidgetEvent::MoveEnd,
    );

    let display = widget.display();
    paint_image(ui, frame_rect, display, textures, settings, cropping);

    if let Some(Display { fit: Some(fit), offset, .. }) = display {
        if cropping {
            let image_rect = egui::Rect::from_min_size(
                to_screen(frame_rect, offset),
                egui::vec2(fit.display_size.width, fit.display_size.height),
            );
            let grab = if matches!(widget.mode(), InteractionMode::PanningImage { .. }) {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Grab
            };
            let image = ui
                .interact(image_rect, ui.id().with("frame_image"), pan_sense())
                .on_hover_cursor(grab);
            push_drag_events(
                ui,
                &image,
                &mut events,
                WidgetEvent::PanStart,
                WidgetEvent::PanDelta,
                WidgetEvent::PanEnd,
            );
        }
    }

    let border = if cropping {
        egui::Color32::WHITE
    } else if widget.is_drop_target() || widget.is_previewing() {
        DROP_ACCENT
    } else {
        FRAME_ACCENT
    };
    ui.painter()
        .rect_stroke(frame_rect, 0.0, egui::Stroke::new(2.0, border));

    for direction in ResizeDirection::ALL {
        let rect = handle_rect(frame_rect, direction, settings.handle_size);
        let handle = ui
            .interact(
                rect,
                ui.id().with(("resize_handle", direction)),
                egui::Sense::drag(),
            )
            .on_hover_cursor(resize_cursor(direction));
        if is_corner(direction) || handle.hovered() || handle.dragged() {
            ui.painter().rect_filled(
                egui::Rect::from_center_size(
                    rect.center(),
                    egui::vec2(settings.handle_size, settings.handle_size),
                ),
                2.0,
                border,
            );
        }
        push_drag_events(
            ui,
            &handle,
            &mut events,
            WidgetEvent::ResizeStart(direction),
            WidgetEvent::ResizeDelta,
            WidgetEvent::ResizeEnd,
        );
    }

    collect_external_drag(ui, widget, frame_rect, &mut events);

    // Status line below the artboard
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Mode: {}", mode_label(widget.mode())));
        ui.separator();
        ui.label(format!(
            "Frame: {:.0}×{:.0} at ({:.0}, {:.0})",
            frame.size.width, frame.size.height, frame.position.x, frame.position.y
        ));
        if let Some(natural) = widget.image().natural_size() {
            ui.separator();
            ui.label(format!("Image: {:.0}×{:.0}", natural.width, natural.height));
        }
        ui.separator();
        let hint = if cropping {
            "Drag the image to reposition it, click outside the frame to finish"
        } else if widget.is_previewing() {
            "Release to place the image in the frame"
        } else if widget.active_image().is_some() {
            "Double-click the image to crop"
        } else {
            "Upload an image or drop one onto the frame"
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    events
}

/// Translate a start/drag/stop sequence into widget events.
fn push_drag_events(
    ui: &egui::Ui,
    response: &egui::Response,
    events: &mut Vec<WidgetEvent>,
    start: WidgetEvent,
    delta: fn(Position) -> WidgetEvent,
    end: WidgetEvent,
) {
    if response.drag_started() {
        events.push(start);
    }
    if response.dragged() {
        if let Some(total) = drag_total(ui) {
            events.push(delta(total));
        }
    }
    if response.drag_stopped() {
        events.push(end);
    }
}

/// Pointer displacement since the button was pressed.
fn drag_total(ui: &egui::Ui) -> Option<Position> {
    ui.input(|i| {
        let origin = i.pointer.press_origin()?;
        let current = i.pointer.interact_pos()?;
        let delta = current - origin;
        Some(Position::new(delta.x, delta.y))
    })
}

/// Work out enter/leave/drop transitions for gallery and desktop drags.
fn collect_external_drag(
    ui: &egui::Ui,
    widget: &FrameWidget,
    frame_rect: egui::Rect,
    events: &mut Vec<WidgetEvent>,
) {
    let ctx = ui.ctx();
    let pointer = ctx.input(|i| i.pointer.hover_pos());
    let over_frame = pointer.is_some_and(|p| frame_rect.contains(p));
    // Desktop file drags do not always report a pointer position
    let file_over_frame = pointer.map_or(true, |p| frame_rect.contains(p));

    let gallery = egui::DragAndDrop::payload::<GalleryPayload>(ctx);
    let hovered_file = ctx.input(|i| {
        i.raw.hovered_files.first().map(|f| FileDrop {
            path: f.path.clone(),
            mime: f.mime.clone(),
        })
    });

    let hovering = match (&gallery, hovered_file) {
        (Some(payload), _) if over_frame => Some(DragPayload::GalleryImage(payload.0)),
        (_, Some(file)) if file_over_frame => Some(DragPayload::FileDrop(file)),
        _ => None,
    };

    match hovering {
        Some(payload) if !widget.is_drop_target() => events.push(WidgetEvent::DragEnter(payload)),
        None if widget.is_drop_target() => events.push(WidgetEvent::DragLeave),
        _ => {}
    }

    let released = ctx.input(|i| i.pointer.any_released());
    if released && over_frame && gallery.is_some() {
        if let Some(payload) = egui::DragAndDrop::take_payload::<GalleryPayload>(ctx) {
            events.push(WidgetEvent::Drop(DragPayload::GalleryImage(payload.0)));
        }
    }

    let dropped = ctx.input(|i| {
        i.raw.dropped_files.first().map(|f| FileDrop {
            path: f.path.clone(),
            mime: f.mime.clone(),
        })
    });
    if let Some(file) = dropped {
        if file_over_frame {
            events.push(WidgetEvent::Drop(DragPayload::FileDrop(file)));
        }
    }
}

/// Paint the displayed image (or a placeholder) inside the frame.
fn paint_image(
    ui: &egui::Ui,
    frame_rect: egui::Rect,
    display: Option<Display>,
    textures: &HashMap<ImageId, egui::TextureHandle>,
    settings: &Settings,
    cropping: bool,
) {
    let painter = ui.painter();
    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

    let Some(display) = display else {
        painter.rect_filled(frame_rect, 0.0, egui::Color32::from_gray(225));
        painter.text(
            frame_rect.center(),
            egui::Align2::CENTER_CENTER,
            "Drop an image here",
            egui::FontId::proportional(16.0),
            egui::Color32::from_gray(120),
        );
        return;
    };

    let (Some(fit), Some(texture)) = (display.fit, textures.get(&display.id)) else {
        painter.rect_filled(frame_rect, 0.0, egui::Color32::from_gray(225));
        painter.text(
            frame_rect.center(),
            egui::Align2::CENTER_CENTER,
            "Loading image...",
            egui::FontId::proportional(14.0),
            egui::Color32::from_gray(120),
        );
        return;
    };

    let image_rect = egui::Rect::from_min_size(
        to_screen(frame_rect, display.offset),
        egui::vec2(fit.display_size.width, fit.display_size.height),
    );
    let tint = if display.preview {
        egui::Color32::WHITE.gamma_multiply(settings.preview_opacity)
    } else {
        egui::Color32::WHITE
    };

    if cropping {
        // Overflow stays visible, dimmed, so the user can see what is cut off
        painter.image(
            texture.id(),
            image_rect,
            uv,
            egui::Color32::WHITE.gamma_multiply(0.4),
        );
    }
    painter
        .with_clip_rect(frame_rect.intersect(painter.clip_rect()))
        .image(texture.id(), image_rect, uv, tint);
}

/// Sense of the image while cropping.
///
/// Clicks are claimed as well as drags so a click on the dimmed overflow
/// does not reach the scrim below and end the crop session.
fn pan_sense() -> egui::Sense {
    egui::Sense::click_and_drag()
}

fn to_screen(origin: egui::Rect, position: Position) -> egui::Pos2 {
    origin.min + egui::vec2(position.x, position.y)
}

fn is_corner(direction: ResizeDirection) -> bool {
    matches!(
        direction,
        ResizeDirection::TopLeft
            | ResizeDirection::TopRight
            | ResizeDirection::BottomLeft
            | ResizeDirection::BottomRight
    )
}

/// Hit area of a resize handle: squares on the corners, strips on the edges.
fn handle_rect(frame: egui::Rect, direction: ResizeDirection, size: f32) -> egui::Rect {
    let half = size / 2.0;
    let corner = |p: egui::Pos2| egui::Rect::from_center_size(p, egui::vec2(size, size));
    match direction {
        ResizeDirection::TopLeft => corner(frame.left_top()),
        ResizeDirection::TopRight => corner(frame.right_top()),
        ResizeDirection::BottomLeft => corner(frame.left_bottom()),
        ResizeDirection::BottomRight => corner(frame.right_bottom()),
        ResizeDirection::Top => egui::Rect::from_min_max(
            egui::pos2(frame.min.x + half, frame.min.y - half),
            egui::pos2(frame.max.x - half, frame.min.y + half),
        ),
        ResizeDirection::Bottom => egui::Rect::from_min_max(
            egui::pos2(frame.min.x + half, frame.max.y - half),
            egui::pos2(frame.max.x - half, frame.max.y + half),
        ),
        ResizeDirection::Left => egui::Rect::from_min_max(
            egui::pos2(frame.min.x - half, frame.min.y + half),
            egui::pos2(frame.min.x + half, frame.max.y - half),
        ),
        ResizeDirection::Right => egui::Rect::from_min_max(
            egui::pos2(frame.max.x - half, frame.min.y + half),
            egui::pos2(frame.max.x + half, frame.max.y - half),
        ),
    }
}

fn resize_cursor(direction: ResizeDirection) -> egui::CursorIcon {
    match direction {
        ResizeDirection::Left | ResizeDirection::Right => egui::CursorIcon::ResizeHorizontal,
        ResizeDirection::Top | ResizeDirection::Bottom => egui::CursorIcon::ResizeVertical,
        ResizeDirection::TopLeft | ResizeDirection::BottomRight => egui::CursorIcon::ResizeNwSe,
        ResizeDirection::TopRight | ResizeDirection::BottomLeft => egui::CursorIcon::ResizeNeSw,
    }
}

fn mode_label(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Idle => "Idle",
        InteractionMode::MovingFrame { .. } => "Moving frame",
        InteractionMode::ResizingFrame { .. } => "Resizing frame",
        InteractionMode::PanningImage { .. } => "Panning image",
        InteractionMode::Cropping => "Cropping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(400.0, 300.0))
    }

    #[test]
    fn test_corner_handles_center_on_corners() {
        let rect = handle_rect(frame(), ResizeDirection::BottomRight, 10.0);
        assert_eq!(rect.center(), egui::pos2(500.0, 350.0));
        assert_eq!(rect.width(), 10.0);
    }

    #[test]
    fn test_edge_handles_do_not_overlap_corners() {
        let frame = frame();
        for edge in [
            ResizeDirection::Top,
            ResizeDirection::Right,
            ResizeDirection::Bottom,
            ResizeDirection::Left,
        ] {
            let edge_rect = handle_rect(frame, edge, 10.0);
            for corner in ResizeDirection::ALL.into_iter().filter(|d| is_corner(*d)) {
                let corner_rect = handle_rect(frame, corner, 10.0);
                let overlap = edge_rect.intersect(corner_rect);
                assert!(
                    overlap.width() <= 0.0 || overlap.height() <= 0.0,
                    "{:?} overlaps {:?}",
                    edge,
                    corner
                );
            }
        }
    }

    #[test]
    fn test_pan_target_claims_clicks() {
        let sense = pan_sense();
        assert!(sense.drag);
        assert!(sense.click);
    }

    #[test]
    fn test_to_screen_offsets_from_origin() {
        let p = to_screen(frame(), Position::new(-30.0, 12.5));
        assert_eq!(p, egui::pos2(70.0, 62.5));
    }
}
