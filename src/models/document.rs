// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image document state.
//!
//! This module defines the persisted unit of work: one image, its study
//! status and description, and the highlights drawn on it.

use super::annotation::{Annotation, StudyStatus};
use serde::{Deserialize, Serialize};

/// Complete markup document for one image, for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDocument {
    pub media_file: String,
    pub frame_width: u32,
    pub frame_height: u32,
    #[serde(default)]
    pub status: StudyStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl ImageDocument {
    /// Create a fresh document for the given media file and dimensions.
    pub fn new(media_file: String, frame_width: u32, frame_height: u32) -> Self {
        Self {
            media_file,
            frame_width,
            frame_height,
            status: StudyStatus::default(),
            description: String::new(),
            annotations: Vec::new(),
        }
    }
}
