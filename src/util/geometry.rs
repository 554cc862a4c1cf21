// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module converts between screen coordinates inside the letterboxed
//! image rect and image-native pixel coordinates, and turns signed
//! annotation extents into screen rectangles for painting.

use crate::models::annotation::{Annotation, Point};

/// Convert a screen position inside `image_rect` to image pixels.
pub fn to_image_coords(
    pos: egui::Pos2,
    image_rect: &egui::Rect,
    image_size: (u32, u32),
) -> Point {
    let (img_width, img_height) = image_size;
    Point {
        x: ((pos.x - image_rect.min.x) / image_rect.width()) as f64 * img_width as f64,
        y: ((pos.y - image_rect.min.y) / image_rect.height()) as f64 * img_height as f64,
    }
}

/// Screen rectangle for an annotation, normalizing signed extents.
///
/// An annotation dragged up/left has negative width/height; the returned
/// rect spans the same area with a positive size.
pub fn annotation_screen_rect(
    annotation: &Annotation,
    image_rect: &egui::Rect,
    image_size: (u32, u32),
) -> egui::Rect {
    let (img_width, img_height) = image_size;
    let scale_x = image_rect.width() / img_width as f32;
    let scale_y = image_rect.height() / img_height as f32;

    let a = egui::pos2(
        image_rect.min.x + annotation.x as f32 * scale_x,
        image_rect.min.y + annotation.y as f32 * scale_y,
    );
    let b = egui::pos2(
        image_rect.min.x + (annotation.x + annotation.width) as f32 * scale_x,
        image_rect.min.y + (annotation.y + annotation.height) as f32 * scale_y,
    );
    egui::Rect::from_two_pos(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(w, h))
    }

    #[test]
    fn test_to_image_coords_corners() {
        let image_rect = rect(100.0, 50.0, 400.0, 300.0);
        let size = (800, 600);

        let tl = to_image_coords(egui::pos2(100.0, 50.0), &image_rect, size);
        assert_eq!(tl.x, 0.0);
        assert_eq!(tl.y, 0.0);

        let br = to_image_coords(egui::pos2(500.0, 350.0), &image_rect, size);
        assert!((br.x - 800.0).abs() < 0.001);
        assert!((br.y - 600.0).abs() < 0.001);
    }

    #[test]
    fn test_screen_rect_roundtrip() {
        let image_rect = rect(100.0, 50.0, 400.0, 300.0);
        let size = (800, 600);
        let annotation = Annotation {
            id: "anno-1".to_string(),
            x: 200.0,
            y: 150.0,
            width: 100.0,
            height: 60.0,
            fill: String::new(),
        };
        let screen = annotation_screen_rect(&annotation, &image_rect, size);
        assert!((screen.min.x - 200.0).abs() < 0.001);
        assert!((screen.min.y - 125.0).abs() < 0.001);
        assert!((screen.width() - 50.0).abs() < 0.001);
        assert!((screen.height() - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_negative_extents_normalize() {
        let image_rect = rect(0.0, 0.0, 800.0, 600.0);
        let size = (800, 600);
        let annotation = Annotation {
            id: "anno-2".to_string(),
            x: 300.0,
            y: 200.0,
            width: -100.0,
            height: -50.0,
            fill: String::new(),
        };
        let screen = annotation_screen_rect(&annotation, &image_rect, size);
        assert_eq!(screen.min, egui::pos2(200.0, 150.0));
        assert_eq!(screen.max, egui::pos2(300.0, 200.0));
    }
}
