// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fill-token parsing.
//!
//! Highlight fills are stored as CSS-style `rgba(r, g, b, a)` tokens so
//! documents stay readable and compatible with the web viewer's palette.

/// Parse an `rgba(r, g, b, a)` token into an egui color.
///
/// Returns a neutral translucent gray for tokens that do not parse, so a
/// hand-edited document still renders rather than disappearing.
pub fn parse_fill(token: &str) -> egui::Color32 {
    parse_rgba(token).unwrap_or(egui::Color32::from_rgba_unmultiplied(128, 128, 128, 128))
}

fn parse_rgba(token: &str) -> Option<egui::Color32> {
    let inner = token
        .trim()
        .strip_prefix("rgba(")?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);

    let r: u8 = parts.next()?.parse().ok()?;
    let g: u8 = parts.next()?.parse().ok()?;
    let b: u8 = parts.next()?.parse().ok()?;
    let alpha: f32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(0.0..=1.0).contains(&alpha) {
        return None;
    }

    Some(egui::Color32::from_rgba_unmultiplied(
        r,
        g,
        b,
        (alpha * 255.0).round() as u8,
    ))
}
