// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation and study-status data structures.
//!
//! This module defines the rectangle highlight record stored in documents
//! and the four-stage study-status pipeline that supplies highlighter
//! colors.

use serde::{Deserialize, Serialize};

/// A 2D point in image-native pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single rectangular highlight on an image.
///
/// `width` and `height` are signed: dragging toward the origin produces
/// negative extents, which are valid and render as a rectangle with the
/// opposite corner as origin. The fill token is fixed at creation from the
/// highlighter selected at the time and is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
}

/// Study-status pipeline stage for an image or a highlight color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyStatus {
    #[serde(rename = "To Study")]
    ToStudy,
    #[serde(rename = "Partially Studied")]
    PartiallyStudied,
    #[serde(rename = "Fully Studied")]
    FullyStudied,
    #[serde(rename = "To Be Revised")]
    ToBeRevised,
}

impl Default for StudyStatus {
    fn default() -> Self {
        StudyStatus::ToStudy
    }
}

impl StudyStatus {
    /// All stages in pipeline order.
    pub const ALL: [StudyStatus; 4] = [
        StudyStatus::ToStudy,
        StudyStatus::PartiallyStudied,
        StudyStatus::FullyStudied,
        StudyStatus::ToBeRevised,
    ];

    /// Human-readable stage name, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            StudyStatus::ToStudy => "To Study",
            StudyStatus::PartiallyStudied => "Partially Studied",
            StudyStatus::FullyStudied => "Fully Studied",
            StudyStatus::ToBeRevised => "To Be Revised",
        }
    }

    /// Translucent highlighter fill token for this stage.
    pub fn fill(&self) -> &'static str {
        match self {
            StudyStatus::ToStudy => "rgba(59, 130, 246, 0.5)",
            StudyStatus::PartiallyStudied => "rgba(234, 179, 8, 0.5)",
            StudyStatus::FullyStudied => "rgba(34, 197, 94, 0.5)",
            StudyStatus::ToBeRevised => "rgba(239, 68, 68, 0.5)",
        }
    }
}
