// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Framecrop - place, frame and crop images on an artboard
//!
//! A cross-platform desktop application that shows a movable, resizable
//! frame on a fixed artboard. Images uploaded to the gallery can be dropped
//! into the frame, where they are scaled to cover it and can be panned in
//! a cropping mode.

mod app;
mod config;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::FramecropApp;
use config::Settings;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Optional settings file as the first argument
    let settings = match std::env::args_os().nth(1) {
        Some(path) => io::serialization::load_settings(&PathBuf::from(path))?,
        None => Settings::default(),
    };

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.artboard_width + 320.0, settings.artboard_height + 80.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true)
            .with_title("Framecrop"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Framecrop",
        options,
        Box::new(move |_cc| Ok(Box::new(FramecropApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
