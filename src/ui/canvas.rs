// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and rectangle highlighting.
//!
//! This module shows the loaded image letterboxed into the available
//! space, paints committed and in-progress highlights over it, and turns
//! pointer drags into draw actions in image-native pixel coordinates.

use crate::models::annotation::{Annotation, Point, StudyStatus};
use crate::util::{color, geometry};

/// Result of canvas interaction for one frame.
pub enum CanvasAction {
    None,
    BeginDraw(Point),
    UpdateDraw(Point),
    EndDraw,
}

/// Display the canvas area and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    image_texture: &Option<egui::TextureHandle>,
    image_size: Option<(u32, u32)>,
    committed: &[Annotation],
    draft: Option<&Annotation>,
    active_status: StudyStatus,
    dirty: bool,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        if let (Some(texture), Some((img_width, img_height))) = (image_texture, image_size) {
            let available = ui.available_size();
            let img_aspect = img_width as f32 / img_height as f32;
            let available_aspect = available.x / available.y;

            // Fit the image into the panel, preserving aspect ratio
            let (display_width, display_height) = if img_aspect > available_aspect {
                (available.x, available.x / img_aspect)
            } else {
                (available.y * img_aspect, available.y)
            };

            let x_offset = (available.x - display_width) / 2.0;
            let y_offset = (available.y - display_height) / 2.0;
            let image_rect = egui::Rect::from_min_size(
                ui.min_rect().min + egui::vec2(x_offset, y_offset),
                egui::vec2(display_width, display_height),
            );

            ui.painter().image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            // Pointer drags inside the image start a highlight; moves during
            // the drag may leave the rect, which just yields coordinates
            // outside the image (valid, the extents stay signed).
            let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());
            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if image_rect.contains(pos) {
                        action = CanvasAction::BeginDraw(geometry::to_image_coords(
                            pos,
                            &image_rect,
                            (img_width, img_height),
                        ));
                    }
                }
            } else if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    action = CanvasAction::UpdateDraw(geometry::to_image_coords(
                        pos,
                        &image_rect,
                        (img_width, img_height),
                    ));
                }
            } else if response.drag_stopped() {
                action = CanvasAction::EndDraw;
            }

            let painter = ui.painter();
            for annotation in committed {
                let rect =
                    geometry::annotation_screen_rect(annotation, &image_rect, (img_width, img_height));
                painter.rect_filled(rect, 0.0, color::parse_fill(&annotation.fill));
            }

            // The draft is visually present but not yet committed; outline
            // it so the user can see the rectangle they are stretching.
            if let Some(annotation) = draft {
                let rect =
                    geometry::annotation_screen_rect(annotation, &image_rect, (img_width, img_height));
                painter.rect_filled(rect, 0.0, color::parse_fill(&annotation.fill));
                painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.5, egui::Color32::WHITE));
            }
        } else {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.heading(
                        egui::RichText::new("StudyMark")
                            .size(32.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                    ui.label(
                        egui::RichText::new("Highlight what still needs studying")
                            .size(14.0)
                            .color(egui::Color32::from_gray(150)),
                    );
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("Open an image to begin marking it up")
                            .color(egui::Color32::from_gray(180)),
                    );
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new("File → Open Image...")
                            .weak()
                            .color(egui::Color32::from_gray(130)),
                    );
                });
            });
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Highlighter: {}", active_status.label()));
        ui.separator();
        ui.label(format!("{} highlights", committed.len()));
        ui.separator();
        if dirty {
            ui.label(egui::RichText::new("Unsaved changes").color(egui::Color32::LIGHT_YELLOW));
        } else {
            ui.label("Saved");
        }
    });

    action
}
