// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Document properties panel.
//!
//! Shows the loaded document's file info and lets the user edit its study
//! status and description.

use crate::models::annotation::StudyStatus;
use crate::models::document::ImageDocument;

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    /// Status or description was edited; the document needs saving.
    Changed,
}

/// Display the properties panel.
pub fn show(ui: &mut egui::Ui, document: &mut Option<ImageDocument>) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Document");
    ui.separator();

    let Some(doc) = document else {
        ui.label(egui::RichText::new("No image loaded").weak());
        return action;
    };

    let file_name = std::path::Path::new(&doc.media_file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| doc.media_file.clone());
    ui.label(file_name);
    ui.label(
        egui::RichText::new(format!("{} × {} px", doc.frame_width, doc.frame_height)).weak(),
    );

    ui.add_space(8.0);
    egui::ComboBox::from_label("Status")
        .selected_text(doc.status.label())
        .show_ui(ui, |ui| {
            for status in StudyStatus::ALL {
                if ui
                    .selectable_value(&mut doc.status, status, status.label())
                    .clicked()
                {
                    action = PropertiesAction::Changed;
                }
            }
        });

    ui.add_space(8.0);
    ui.label("Description:");
    if ui
        .add(
            egui::TextEdit::multiline(&mut doc.description)
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        action = PropertiesAction::Changed;
    }

    ui.add_space(8.0);
    ui.label(format!("Highlights: {}", doc.annotations.len()));

    action
}
