// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! StudyMark - study image markup
//!
//! A cross-platform desktop application for highlighting regions of study
//! images with status-colored rectangles, with full undo/redo history and
//! JSON/YAML document persistence.

mod app;
mod history;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::StudyMarkApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("StudyMark - Study Image Markup"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "StudyMark",
        options,
        Box::new(|_cc| Ok(Box::new(StudyMarkApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
