// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for the image frame widget.

pub mod drag_source;
pub mod frame;
pub mod gallery;
pub mod image_fit;
pub mod interaction;
