// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the annotation history engine to the UI: pointer
//! actions from the canvas drive the draw lifecycle, committed sets flow
//! back through the engine's change callback into the open document, and
//! documents are loaded and saved through the io layer.

use crate::history::AnnotationHistory;
use crate::models::{
    annotation::{Annotation, StudyStatus},
    document::ImageDocument,
};
use crate::ui::{canvas, properties, toolbar};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Result of background image/document loading.
struct LoadedData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    document: ImageDocument,
    /// Set when the load came from an existing document file.
    document_path: Option<PathBuf>,
}

/// Main application state.
pub struct StudyMarkApp {
    /// Currently open markup document
    document: Option<ImageDocument>,

    /// Where the document was loaded from / last saved to
    document_path: Option<PathBuf>,

    /// Snapshot history driving draw/undo/redo
    history: AnnotationHistory,

    /// Committed annotation sets emitted by the history callback
    committed_rx: Receiver<Vec<Annotation>>,

    /// Highlighter stage selected in the toolbar
    active_status: StudyStatus,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Image dimensions (width, height)
    image_size: Option<(u32, u32)>,

    /// Receiver for background loading
    loader: Option<Receiver<Result<LoadedData, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Whether the document has edits not yet written to disk
    dirty: bool,
}

impl Default for StudyMarkApp {
    fn default() -> Self {
        Self::new()
    }
}

impl StudyMarkApp {
    /// Create a new StudyMark application instance.
    pub fn new() -> Self {
        let (tx, committed_rx) = channel();
        let mut history = AnnotationHistory::new();
        history.set_on_change(Box::new(move |set: &[Annotation]| {
            let _ = tx.send(set.to_vec());
        }));

        Self {
            document: None,
            document_path: None,
            history,
            committed_rx,
            active_status: StudyStatus::default(),
            image_texture: None,
            image_size: None,
            loader: None,
            loading_message: None,
            dirty: false,
        }
    }

    /// Load an image file and start a fresh document for it (asynchronously).
    pub fn open_image(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedData, String> {
                let loaded = crate::io::media::load_image(&path)
                    .map_err(|e| format!("Failed to load image: {}", e))?;

                log::info!(
                    "Loaded image: {} ({}x{})",
                    path.display(),
                    loaded.width,
                    loaded.height
                );

                let document = ImageDocument::new(
                    path.to_string_lossy().to_string(),
                    loaded.width,
                    loaded.height,
                );

                Ok(LoadedData {
                    width: loaded.width,
                    height: loaded.height,
                    pixels: loaded.pixels,
                    document,
                    document_path: None,
                })
            })();

            let _ = sender.send(result);
        });
    }

    /// Load a saved markup document and its referenced image (asynchronously).
    fn open_document(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.loader = Some(receiver);
        self.loading_message = Some("Loading document and image...".to_string());

        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedData, String> {
                let document = crate::io::serialization::load_document(&path)
                    .map_err(|e| format!("Failed to load document: {}", e))?;

                log::info!(
                    "Loaded document with {} highlights from {}",
                    document.annotations.len(),
                    path.display()
                );

                // Relative media paths resolve against the document's folder
                let mut image_path = PathBuf::from(&document.media_file);
                if image_path.is_relative() {
                    if let Some(parent) = path.parent() {
                        image_path = parent.join(image_path);
                    }
                }
                if !image_path.exists() {
                    return Err(format!(
                        "Referenced image not found: {}",
                        image_path.display()
                    ));
                }

                let loaded = crate::io::media::load_image(&image_path)
                    .map_err(|e| format!("Failed to load image: {}", e))?;

                Ok(LoadedData {
                    width: loaded.width,
                    height: loaded.height,
                    pixels: loaded.pixels,
                    document,
                    document_path: Some(path),
                })
            })();

            let _ = sender.send(result);
        });
    }

    /// Write the current document to the given path.
    fn save_document(&mut self, path: PathBuf) {
        if let Some(ref document) = self.document {
            match crate::io::serialization::save_document(document, &path) {
                Ok(()) => {
                    log::info!("Saved document to {}", path.display());
                    self.document_path = Some(path);
                    self.dirty = false;
                }
                Err(e) => log::error!("Failed to save document: {}", e),
            }
        }
    }

    fn finish_loading(&mut self, ctx: &egui::Context, loaded: LoadedData) {
        let size = [loaded.width as usize, loaded.height as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
        let texture = ctx.load_texture("loaded_image", color_image, egui::TextureOptions::LINEAR);

        self.image_texture = Some(texture);
        self.image_size = Some((loaded.width, loaded.height));

        // A different image means an unrelated annotation universe, so the
        // history restarts from the document's stored set.
        self.history.reset(loaded.document.annotations.clone());
        self.document_path = loaded.document_path;
        self.document = Some(loaded.document);
        self.dirty = false;

        log::info!("Image loaded successfully");
    }

    fn undo(&mut self) {
        if self.history.can_undo() {
            self.history.undo();
            log::info!("Undo");
        }
    }

    fn redo(&mut self) {
        if self.history.can_redo() {
            self.history.redo();
            log::info!("Redo");
        }
    }
}

impl eframe::App for StudyMarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pull committed annotation sets emitted by the history callback
        // into the open document.
        while let Ok(set) = self.committed_rx.try_recv() {
            if let Some(ref mut document) = self.document {
                document.annotations = set;
                self.dirty = true;
            }
        }

        // Check for completed background loading
        if let Some(ref receiver) = self.loader {
            if let Ok(result) = receiver.try_recv() {
                self.loader = None;
                self.loading_message = None;

                match result {
                    Ok(loaded) => self.finish_loading(ctx, loaded),
                    Err(e) => log::error!("Load failed: {}", e),
                }
            }
        }

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"])
                            .pick_file()
                        {
                            self.open_image(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Open Document...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Markup documents", &["json", "yaml", "yml"])
                            .pick_file()
                        {
                            self.open_document(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();

                    let has_document = self.document.is_some();
                    let has_path = self.document_path.is_some();
                    if ui
                        .add_enabled(has_document && has_path, egui::Button::new("Save"))
                        .clicked()
                    {
                        if let Some(path) = self.document_path.clone() {
                            self.save_document(path);
                        }
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(has_document, egui::Button::new("Save As..."))
                        .clicked()
                    {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .add_filter("YAML", &["yaml", "yml"])
                            .set_file_name("markup.json")
                            .save_file()
                        {
                            self.save_document(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(self.history.can_undo(), egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.undo();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(
                            self.history.can_redo(),
                            egui::Button::new("Redo (Ctrl+Shift+Z)"),
                        )
                        .clicked()
                    {
                        self.redo();
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    &mut self.active_status,
                    self.history.can_undo(),
                    self.history.can_redo(),
                )
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::Undo => self.undo(),
            toolbar::ToolbarAction::Redo => self.redo(),
            toolbar::ToolbarAction::None => {}
        }

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, &mut self.document))
            .inner;

        if let properties::PropertiesAction::Changed = properties_action {
            self.dirty = true;
        }

        // Keyboard shortcuts, skipped while a text field has focus
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| {
                i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift
            }) {
                self.undo();
            }
            if ctx.input(|i| {
                (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                    || (i.modifiers.command && i.key_pressed(egui::Key::Y))
            }) {
                self.redo();
            }
        }

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    canvas::CanvasAction::None
                } else {
                    canvas::show(
                        ui,
                        &self.image_texture,
                        self.image_size,
                        self.history.committed(),
                        self.history.draft(),
                        self.active_status,
                        self.dirty,
                    )
                }
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::BeginDraw(pos) => {
                self.history.begin_draw(pos, self.active_status.fill());
            }
            canvas::CanvasAction::UpdateDraw(pos) => {
                self.history.update_draw(pos);
            }
            canvas::CanvasAction::EndDraw => {
                self.history.end_draw();
            }
            canvas::CanvasAction::None => {}
        }
    }
}
