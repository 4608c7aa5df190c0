// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interaction state machine for the image frame.
//!
//! [`FrameWidget`] is the single state record of the widget. The UI layer
//! translates pointer and drag input into [`WidgetEvent`]s and feeds them to
//! [`FrameWidget::handle`]; the widget decides which gesture owns the
//! event, updates frame and image geometry, and may ask the host to run a
//! collaborator through a [`WidgetEffect`].
//!
//! Modes are mutually exclusive:
//!
//! - `Idle` → `MovingFrame` on a drag over the frame body
//! - `Idle`/`Cropping` → `ResizingFrame` on a drag over a resize handle
//! - `Idle` → `Cropping` on a double-click over the active image
//! - `Cropping` → `PanningImage` on a drag over the image
//! - `Cropping` → `Idle` on a click on the scrim, clamping the pan offset

use super::drag_source::{Candidate, DragSourceRegistry};
use super::frame::{FrameRect, FrameState, ResizeDirection};
use super::gallery::ImageId;
use super::image_fit::ImageFitState;
use crate::util::geometry::{cover_fit, CoverFit, Position, Size};
use std::path::PathBuf;

/// Current interaction mode of the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionMode {
    Idle,
    /// Dragging the frame; `origin` is the frame position at drag start
    MovingFrame { origin: Position },
    /// Dragging a resize handle
    ResizingFrame {
        direction: ResizeDirection,
        /// Return to cropping once the resize ends
        resume_cropping: bool,
    },
    /// Dragging the image while cropping; `origin` is the offset at drag start
    PanningImage { origin: Position },
    Cropping,
}

/// A file dragged in from the desktop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileDrop {
    pub path: Option<PathBuf>,
    pub mime: String,
}

/// What an external drag carries.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    GalleryImage(ImageId),
    FileDrop(FileDrop),
    None,
}

/// Discrete input to the widget.
///
/// Delta events carry the total pointer displacement since the matching
/// start event.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    MoveStart,
    MoveDelta(Position),
    MoveEnd,
    ResizeStart(ResizeDirection),
    ResizeDelta(Position),
    ResizeEnd,
    PanStart,
    PanDelta(Position),
    PanEnd,
    GalleryDragStart(Candidate),
    GalleryDragEnd,
    DragEnter(DragPayload),
    DragLeave,
    Drop(DragPayload),
    DoubleClick,
    ScrimClick,
    /// The active image was selected (or cleared) upstream
    SelectImage(Option<ImageId>),
    ImageLoaded { id: ImageId, natural_size: Size },
    ImageFailed(ImageId),
}

/// Work the host must do on behalf of the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEffect {
    /// The natural size of this image is needed
    ResolveSize(ImageId),
    /// Validate and upload a dropped file
    Upload(FileDrop),
}

/// What the frame currently displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Display {
    pub id: ImageId,
    /// `None` while the natural size is unknown
    pub fit: Option<CoverFit>,
    pub offset: Position,
    /// Showing a dimmed gallery candidate rather than the active image
    pub preview: bool,
}

/// Owned state of the frame widget.
#[derive(Debug, Clone)]
pub struct FrameWidget {
    frame: FrameState,
    image: ImageFitState,
    mode: InteractionMode,
    drag_source: DragSourceRegistry,
    drop_target: bool,
}

impl FrameWidget {
    pub fn new(frame: FrameState) -> Self {
        Self {
            frame,
            image: ImageFitState::new(),
            mode: InteractionMode::Idle,
            drag_source: DragSourceRegistry::default(),
            drop_target: false,
        }
    }

    pub fn frame_rect(&self) -> FrameRect {
        self.frame.rect()
    }

    pub fn artboard(&self) -> Size {
        self.frame.artboard()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn image(&self) -> &ImageFitState {
        &self.image
    }

    pub fn active_image(&self) -> Option<ImageId> {
        self.image.source()
    }

    pub fn is_drop_target(&self) -> bool {
        self.drop_target
    }

    pub fn is_previewing(&self) -> bool {
        self.drag_source.is_previewing()
    }

    pub fn drag_candidate(&self) -> Option<Candidate> {
        self.drag_source.candidate()
    }

    pub fn is_cropping(&self) -> bool {
        matches!(
            self.mode,
            InteractionMode::Cropping
                | InteractionMode::PanningImage { .. }
                | InteractionMode::ResizingFrame {
                    resume_cropping: true,
                    ..
                }
        )
    }

    /// The image to draw in the frame: the preview candidate if any,
    /// otherwise the active image.
    pub fn display(&self) -> Option<Display> {
        if let Some(candidate) = self.drag_source.preview() {
            let fit = candidate
                .natural_size
                .map(|natural| cover_fit(self.frame.size(), natural));
            let offset = fit
                .map(|f| f.pan_bounds.clamp(self.image.offset()))
                .unwrap_or(Position::ZERO);
            return Some(Display {
                id: candidate.id,
                fit,
                offset,
                preview: true,
            });
        }

        self.image.source().map(|id| Display {
            id,
            fit: self.image.fit(),
            offset: self.image.offset(),
            preview: false,
        })
    }

    /// Dispatch one event through the state machine.
    pub fn handle(&mut self, event: WidgetEvent) -> Option<WidgetEffect> {
        match event {
            WidgetEvent::MoveStart => {
                if self.mode == InteractionMode::Idle {
                    self.set_mode(InteractionMode::MovingFrame {
                        origin: self.frame.position(),
                    });
                }
            }
            WidgetEvent::MoveDelta(total) => {
                if let InteractionMode::MovingFrame { origin } = self.mode {
                    self.frame.apply_move(origin.offset_by(total));
                }
            }
            WidgetEvent::MoveEnd => {
                if matches!(self.mode, InteractionMode::MovingFrame { .. }) {
                    self.set_mode(InteractionMode::Idle);
                }
            }
            WidgetEvent::ResizeStart(direction) => {
                let resume_cropping = match self.mode {
                    InteractionMode::Idle => false,
                    InteractionMode::Cropping => true,
                    _ => return None,
                };
                self.frame.begin_resize();
                self.set_mode(InteractionMode::ResizingFrame {
                    direction,
                    resume_cropping,
                });
            }
            WidgetEvent::ResizeDelta(total) => {
                if let InteractionMode::ResizingFrame { direction, .. } = self.mode {
                    if self.frame.apply_resize_delta(direction, direction.growth(total)) {
                        self.refit();
                    }
                }
            }
            WidgetEvent::ResizeEnd => {
                if let InteractionMode::ResizingFrame {
                    resume_cropping, ..
                } = self.mode
                {
                    self.frame.end_resize();
                    self.set_mode(if resume_cropping {
                        InteractionMode::Cropping
                    } else {
                        InteractionMode::Idle
                    });
                }
            }
            WidgetEvent::PanStart => {
                if self.mode == InteractionMode::Cropping {
                    self.set_mode(InteractionMode::PanningImage {
                        origin: self.image.offset(),
                    });
                }
            }
            WidgetEvent::PanDelta(total) => {
                if let InteractionMode::PanningImage { origin } = self.mode {
                    self.image.pan(origin.offset_by(total), true);
                }
            }
            WidgetEvent::PanEnd => {
                if matches!(self.mode, InteractionMode::PanningImage { .. }) {
                    self.set_mode(InteractionMode::Cropping);
                }
            }
            WidgetEvent::GalleryDragStart(candidate) => {
                self.drag_source.begin_drag(candidate);
            }
            WidgetEvent::GalleryDragEnd => {
                self.drag_source.end_drag();
                self.drop_target = false;
            }
            WidgetEvent::DragEnter(payload) => self.drag_enter(payload),
            WidgetEvent::DragLeave => {
                self.drop_target = false;
                self.drag_source.set_previewing(false);
            }
            WidgetEvent::Drop(payload) => return self.drop_payload(payload),
            WidgetEvent::DoubleClick => {
                if self.mode == InteractionMode::Idle && self.image.source().is_some() {
                    self.set_mode(InteractionMode::Cropping);
                }
            }
            WidgetEvent::ScrimClick => {
                if self.mode == InteractionMode::Cropping {
                    self.image.clamp_offset();
                    self.set_mode(InteractionMode::Idle);
                }
            }
            WidgetEvent::SelectImage(source) => return self.select_image(source),
            WidgetEvent::ImageLoaded { id, natural_size } => {
                let cropping = self.is_cropping();
                if self
                    .image
                    .on_image_loaded(id, natural_size, self.frame.size(), cropping)
                {
                    log::info!(
                        "Image {:?} resolved at {}x{}",
                        id,
                        natural_size.width,
                        natural_size.height
                    );
                }
                if let Some(candidate) = self.drag_source.candidate() {
                    if candidate.id == id && candidate.natural_size.is_none() {
                        let previewing = self.drag_source.is_previewing();
                        self.drag_source.begin_drag(Candidate {
                            id,
                            natural_size: Some(natural_size),
                        });
                        self.drag_source.set_previewing(previewing);
                    }
                }
            }
            WidgetEvent::ImageFailed(id) => {
                if self.drag_source.candidate().is_some_and(|c| c.id == id) {
                    self.drag_source.end_drag();
                }
                if self.image.source() == Some(id) {
                    log::warn!("Active image {:?} could not be decoded", id);
                    return self.select_image(None);
                }
            }
        }
        None
    }

    fn drag_enter(&mut self, payload: DragPayload) {
        if self.is_cropping() {
            return;
        }
        match payload {
            DragPayload::GalleryImage(id) => {
                self.drop_target = true;
                if self.drag_source.candidate().is_some_and(|c| c.id == id) {
                    self.drag_source.set_previewing(true);
                }
            }
            DragPayload::FileDrop(_) => self.drop_target = true,
            DragPayload::None => {}
        }
    }

    fn drop_payload(&mut self, payload: DragPayload) -> Option<WidgetEffect> {
        if self.is_cropping() {
            return None;
        }
        self.drop_target = false;
        self.drag_source.set_previewing(false);

        match payload {
            DragPayload::GalleryImage(id) => self.select_image(Some(id)),
            DragPayload::FileDrop(file) => {
                log::info!("File dropped on frame: {:?}", file.path);
                Some(WidgetEffect::Upload(file))
            }
            DragPayload::None => None,
        }
    }

    fn select_image(&mut self, source: Option<ImageId>) -> Option<WidgetEffect> {
        // Re-selecting the active image keeps its crop
        if source == self.image.source() {
            return None;
        }
        log::info!("Active image changed to {:?}", source);
        self.image.on_image_source_changed(source);
        self.frame.end_resize();
        self.set_mode(InteractionMode::Idle);
        source.map(WidgetEffect::ResolveSize)
    }

    fn refit(&mut self) {
        let cropping = self.is_cropping();
        self.image.recompute_fit(self.frame.size(), cropping);
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        if std::mem::discriminant(&self.mode) != std::mem::discriminant(&mode) {
            log::debug!("Interaction mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }
}
