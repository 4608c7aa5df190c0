// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame position and size management.
//!
//! The frame is the movable, resizable rectangle on the artboard that
//! displays the active image. Moves are clamped so the frame stays inside
//! the artboard; resizes keep the edge opposite the dragged handle fixed.

use crate::util::geometry::{clamp, Position, Size};

/// One of the eight resize handles around the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    Top,
    Right,
    Bottom,
    Left,
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::Top,
        ResizeDirection::Right,
        ResizeDirection::Bottom,
        ResizeDirection::Left,
        ResizeDirection::TopRight,
        ResizeDirection::BottomRight,
        ResizeDirection::BottomLeft,
        ResizeDirection::TopLeft,
    ];

    pub fn includes_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn includes_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn includes_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn includes_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    /// Convert a pointer displacement into size growth for this handle.
    ///
    /// Dragging the left handle leftwards grows the width, dragging the
    /// right handle rightwards grows it. Axes the handle does not control
    /// contribute nothing.
    pub fn growth(self, pointer_delta: Position) -> Size {
        let width = if self.includes_left() {
            -pointer_delta.x
        } else if self.includes_right() {
            pointer_delta.x
        } else {
            0.0
        };
        let height = if self.includes_top() {
            -pointer_delta.y
        } else if self.includes_bottom() {
            pointer_delta.y
        } else {
            0.0
        };
        Size::new(width, height)
    }
}

/// Frame rectangle in artboard-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub position: Position,
    pub size: Size,
}

impl FrameRect {
    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }
}

/// Owns the frame geometry and enforces the artboard contract.
#[derive(Debug, Clone)]
pub struct FrameState {
    rect: FrameRect,
    artboard: Size,
    min_size: Size,
    /// Snapshot taken at the start of a resize gesture
    resize_start: Option<FrameRect>,
}

impl FrameState {
    /// Create a frame of `initial` size centered on the artboard.
    pub fn new(artboard: Size, min_size: Size, initial: Size) -> Self {
        let size = Size::new(
            clamp(initial.width, min_size.width, artboard.width),
            clamp(initial.height, min_size.height, artboard.height),
        );
        let position = Position::new(
            artboard.width / 2.0 - size.width / 2.0,
            artboard.height / 2.0 - size.height / 2.0,
        );
        Self {
            rect: FrameRect { position, size },
            artboard,
            min_size,
            resize_start: None,
        }
    }

    pub fn rect(&self) -> FrameRect {
        self.rect
    }

    pub fn position(&self) -> Position {
        self.rect.position
    }

    pub fn size(&self) -> Size {
        self.rect.size
    }

    pub fn artboard(&self) -> Size {
        self.artboard
    }

    /// Snapshot the current rectangle as the reference for a resize gesture.
    pub fn begin_resize(&mut self) {
        self.resize_start = Some(self.rect);
    }

    /// Apply a cumulative resize delta relative to the snapshot.
    ///
    /// Size is clamped per axis to `[min, artboard]`. The position moves only
    /// on axes whose leading edge is named by `direction`, by the effective
    /// growth, so the opposite edge stays put. Position is not re-clamped
    /// against the artboard here.
    ///
    /// Returns `false` without touching the frame when no resize is active.
    pub fn apply_resize_delta(&mut self, direction: ResizeDirection, delta: Size) -> bool {
        let Some(start) = self.resize_start else {
            log::debug!("Ignoring resize delta outside of a resize gesture");
            return false;
        };

        let size = Size::new(
            clamp(
                start.size.width + delta.width,
                self.min_size.width,
                self.artboard.width,
            ),
            clamp(
                start.size.height + delta.height,
                self.min_size.height,
                self.artboard.height,
            ),
        );

        let mut position = start.position;
        if direction.includes_left() {
            position.x = start.position.x - (size.width - start.size.width);
        }
        if direction.includes_top() {
            position.y = start.position.y - (size.height - start.size.height);
        }

        self.rect = FrameRect { position, size };
        true
    }

    /// Finish the resize gesture and drop the snapshot.
    pub fn end_resize(&mut self) {
        self.resize_start = None;
    }

    /// Move the frame, clamping it fully inside the artboard.
    pub fn apply_move(&mut self, new_position: Position) {
        self.rect.position = Position::new(
            clamp(
                new_position.x,
                0.0,
                self.artboard.width - self.rect.size.width,
            ),
            clamp(
                new_position.y,
                0.0,
                self.artboard.height - self.rect.size.height,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> FrameState {
        FrameState::new(
            Size::new(800.0, 600.0),
            Size::new(100.0, 100.0),
            Size::new(400.0, 300.0),
        )
    }

    #[test]
    fn test_new_frame_is_centered() {
        let frame = frame();
        assert_eq!(frame.position(), Position::new(200.0, 150.0));
        assert_eq!(frame.size(), Size::new(400.0, 300.0));
    }

    #[test]
    fn test_apply_move_stays_inside_artboard() {
        let sizes = [(100.0, 100.0), (400.0, 300.0), (800.0, 600.0), (250.0, 590.0)];
        let targets = [
            (-1000.0, -1000.0),
            (0.0, 0.0),
            (333.0, 111.0),
            (799.0, 599.0),
            (5000.0, -20.0),
        ];

        for (w, h) in sizes {
            let mut frame = FrameState::new(
                Size::new(800.0, 600.0),
                Size::new(100.0, 100.0),
                Size::new(w, h),
            );
            for (x, y) in targets {
                frame.apply_move(Position::new(x, y));
                let pos = frame.position();
                assert!(pos.x >= 0.0 && pos.x <= 800.0 - w, "x {} for width {}", pos.x, w);
                assert!(pos.y >= 0.0 && pos.y <= 600.0 - h, "y {} for height {}", pos.y, h);
            }
        }
    }

    #[test]
    fn test_resize_right_keeps_left_edge() {
        let mut frame = frame();
        frame.begin_resize();
        frame.apply_resize_delta(ResizeDirection::Right, Size::new(50.0, 0.0));
        assert_eq!(frame.position(), Position::new(200.0, 150.0));
        assert_eq!(frame.size(), Size::new(450.0, 300.0));
    }

    #[test]
    fn test_resize_left_keeps_right_edge() {
        let mut frame = frame();
        let right = frame.rect().right();
        frame.begin_resize();
        frame.apply_resize_delta(ResizeDirection::Left, Size::new(80.0, 0.0));
        assert_eq!(frame.position().x, 120.0);
        assert_eq!(frame.rect().right(), right);
    }

    #[test]
    fn test_anchor_invariant_for_all_directions() {
        let deltas = [
            Size::new(40.0, 25.0),
            Size::new(-120.0, -80.0),
            Size::new(-1000.0, 1000.0),
            Size::new(900.0, -900.0),
        ];

        for direction in ResizeDirection::ALL {
            for delta in deltas {
                let mut frame = frame();
                let before = frame.rect();
                frame.begin_resize();
                assert!(frame.apply_resize_delta(direction, delta));
                let after = frame.rect();

                if !direction.includes_left() {
                    assert_eq!(after.position.x, before.position.x, "{:?}", direction);
                } else {
                    assert!((after.right() - before.right()).abs() < 0.0001, "{:?}", direction);
                }
                if !direction.includes_top() {
                    assert_eq!(after.position.y, before.position.y, "{:?}", direction);
                } else {
                    assert!((after.bottom() - before.bottom()).abs() < 0.0001, "{:?}", direction);
                }
            }
        }
    }

    #[test]
    fn test_resize_clamps_size() {
        let mut frame = frame();
        frame.begin_resize();
        frame.apply_resize_delta(ResizeDirection::BottomRight, Size::new(-1000.0, 5000.0));
        assert_eq!(frame.size(), Size::new(100.0, 600.0));
    }

    #[test]
    fn test_resize_deltas_are_relative_to_snapshot() {
        let mut frame = frame();
        frame.begin_resize();
        frame.apply_resize_delta(ResizeDirection::Bottom, Size::new(0.0, 10.0));
        frame.apply_resize_delta(ResizeDirection::Bottom, Size::new(0.0, 30.0));
        assert_eq!(frame.size().height, 330.0);
    }

    #[test]
    fn test_resize_may_leave_artboard() {
        let mut frame = frame();
        frame.apply_move(Position::new(0.0, 0.0));
        frame.begin_resize();
        frame.apply_resize_delta(ResizeDirection::TopLeft, Size::new(100.0, 100.0));
        assert_eq!(frame.position(), Position::new(-100.0, -100.0));
    }

    #[test]
    fn test_resize_without_snapshot_is_noop() {
        let mut frame = frame();
        let before = frame.rect();
        assert!(!frame.apply_resize_delta(ResizeDirection::Left, Size::new(60.0, 0.0)));
        assert_eq!(frame.rect(), before);

        frame.begin_resize();
        frame.end_resize();
        assert!(!frame.apply_resize_delta(ResizeDirection::Left, Size::new(60.0, 0.0)));
        assert_eq!(frame.rect(), before);
    }

    #[test]
    fn test_growth_from_pointer_delta() {
        let delta = Position::new(10.0, -20.0);
        assert_eq!(ResizeDirection::Right.growth(delta), Size::new(10.0, 0.0));
        assert_eq!(ResizeDirection::Left.growth(delta), Size::new(-10.0, 0.0));
        assert_eq!(ResizeDirection::Top.growth(delta), Size::new(0.0, 20.0));
        assert_eq!(ResizeDirection::BottomLeft.growth(delta), Size::new(-10.0, -20.0));
    }
}
