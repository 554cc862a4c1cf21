// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Document serialization and deserialization.
//!
//! Markup documents are saved as YAML or JSON, chosen by file extension.

use crate::models::document::ImageDocument;
use anyhow::{bail, Result};
use std::path::Path;

/// Save a document, picking the format from the file extension.
pub fn save_document(document: &ImageDocument, path: &Path) -> Result<()> {
    let text = match extension(path).as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::to_string(document)?,
        Some("json") => serde_json::to_string_pretty(document)?,
        other => bail!("unsupported document extension: {:?}", other),
    };
    std::fs::write(path, text)?;
    Ok(())
}

/// Load a document, picking the format from the file extension.
pub fn load_document(path: &Path) -> Result<ImageDocument> {
    let text = std::fs::read_to_string(path)?;
    let document = match extension(path).as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
        Some("json") => serde_json::from_str(&text)?,
        other => bail!("unsupported document extension: {:?}", other),
    };
    Ok(document)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}
