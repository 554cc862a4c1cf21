// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with highlighter selection and undo/redo.
//!
//! One button per study-status stage, tinted with the stage's highlight
//! color; the selected stage supplies the fill for every new rectangle.

use crate::models::annotation::StudyStatus;
use crate::util::color;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    Undo,
    Redo,
}

/// Display the toolbar. Mutates `active_status` on selection.
pub fn show(
    ui: &mut egui::Ui,
    active_status: &mut StudyStatus,
    can_undo: bool,
    can_redo: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Highlighter:");
        ui.separator();

        for status in StudyStatus::ALL {
            let tint = color::parse_fill(status.fill()).to_opaque();
            let text = egui::RichText::new(status.label()).color(tint);
            if ui
                .selectable_label(*active_status == status, text)
                .clicked()
            {
                *active_status = status;
            }
        }

        ui.separator();

        if ui
            .add_enabled(can_undo, egui::Button::new("⟲ Undo"))
            .clicked()
        {
            action = ToolbarAction::Undo;
        }
        if ui
            .add_enabled(can_redo, egui::Button::new("⟳ Redo"))
            .clicked()
        {
            action = ToolbarAction::Redo;
        }

        ui.separator();
        ui.label(
            egui::RichText::new("Drag on the image to highlight a region")
                .italics()
                .weak(),
        );
    });

    action
}
