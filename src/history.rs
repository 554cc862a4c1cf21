// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Snapshot-based annotation history with undo/redo.
//!
//! The engine keeps the full annotation set after every committed draw as
//! one snapshot in a linear history, with a cursor pointing at the active
//! snapshot. Drawing runs through a draft lifecycle (`begin_draw`,
//! `update_draw`, `end_draw`); only `end_draw` can mutate history, and only
//! when the rectangle clears the minimum-size rule. Undo and redo move the
//! cursor; a fresh commit after an undo truncates the redo tail.
//!
//! Every operation whose precondition fails is a silent no-op. Pointer
//! events arrive from the UI in whatever order the event loop delivers
//! them, and a stray move after a release is expected, not a bug.

use crate::models::annotation::{Annotation, Point};
use std::time::{SystemTime, UNIX_EPOCH};

/// Rectangles with both extents at or below this many image pixels are
/// treated as accidental clicks and discarded at `end_draw`.
const MIN_COMMIT_EXTENT: f64 = 2.0;

/// Callback invoked with the full current annotation set after every
/// committed mutation (draw commit, undo, redo). The engine never performs
/// persistence itself.
pub type OnChange = Box<dyn FnMut(&[Annotation])>;

/// Linear undo/redo history over annotation-set snapshots.
pub struct AnnotationHistory {
    /// Snapshots; `history[step]` is the active set.
    history: Vec<Vec<Annotation>>,
    /// Cursor into `history`. Invariant: `step < history.len()`.
    step: usize,
    /// In-progress, uncommitted rectangle.
    draft: Option<Annotation>,
    /// Session nonce baked into generated ids.
    session: u64,
    /// Monotonic id counter.
    next_id: u64,
    on_change: Option<OnChange>,
}

impl Default for AnnotationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationHistory {
    /// Create an engine with an empty initial snapshot.
    pub fn new() -> Self {
        let session = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            history: vec![Vec::new()],
            step: 0,
            draft: None,
            session,
            next_id: 0,
            on_change: None,
        }
    }

    /// Register the persistence callback. Survives `reset`.
    pub fn set_on_change(&mut self, callback: OnChange) {
        self.on_change = Some(callback);
    }

    /// Restart history from the given annotation set.
    ///
    /// Called whenever the displayed image changes: a new image is an
    /// unrelated annotation universe, so all prior snapshots are discarded
    /// irrecoverably and any in-flight draft is dropped.
    pub fn reset(&mut self, initial: Vec<Annotation>) {
        self.history = vec![initial];
        self.step = 0;
        self.draft = None;
    }

    /// Start drawing a rectangle at `pos` with the given fill token.
    ///
    /// No-op if a draw is already in progress. History is untouched until
    /// `end_draw` commits.
    pub fn begin_draw(&mut self, pos: Point, fill: &str) {
        if self.draft.is_some() {
            return;
        }
        self.draft = Some(Annotation {
            id: self.fresh_id(),
            x: pos.x,
            y: pos.y,
            width: 0.0,
            height: 0.0,
            fill: fill.to_string(),
        });
    }

    /// Stretch the draft to the current pointer position.
    ///
    /// Extents are signed; dragging above or left of the origin yields
    /// negative width/height, preserved as-is. No-op without a draft.
    pub fn update_draw(&mut self, pos: Point) {
        if let Some(ref mut draft) = self.draft {
            draft.width = pos.x - draft.x;
            draft.height = pos.y - draft.y;
        }
    }

    /// Finish the current draw.
    ///
    /// Commits the draft as a new snapshot if both extents exceed the
    /// minimum size, discarding any redo tail; micro-drags are dropped
    /// without touching history or the callback. No-op without a draft.
    pub fn end_draw(&mut self) {
        let Some(draft) = self.draft.take() else {
            return;
        };
        if draft.width.abs() <= MIN_COMMIT_EXTENT || draft.height.abs() <= MIN_COMMIT_EXTENT {
            return;
        }
        self.history.truncate(self.step + 1);
        let mut snapshot = self.history[self.step].clone();
        snapshot.push(draft);
        self.history.push(snapshot);
        self.step += 1;
        self.fire_on_change();
    }

    /// Step back one snapshot. No-op at the oldest snapshot.
    pub fn undo(&mut self) {
        if self.step == 0 {
            return;
        }
        self.step -= 1;
        self.fire_on_change();
    }

    /// Step forward one snapshot. No-op at the newest snapshot.
    pub fn redo(&mut self) {
        if self.step + 1 >= self.history.len() {
            return;
        }
        self.step += 1;
        self.fire_on_change();
    }

    pub fn can_undo(&self) -> bool {
        self.step > 0
    }

    pub fn can_redo(&self) -> bool {
        self.step + 1 < self.history.len()
    }

    /// The committed annotation set at the cursor.
    pub fn committed(&self) -> &[Annotation] {
        &self.history[self.step]
    }

    /// Render-time view: the committed set plus the draft, if any.
    pub fn visible_annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.history[self.step].iter().chain(self.draft.iter())
    }

    /// The in-progress rectangle, if a draw is underway.
    pub fn draft(&self) -> Option<&Annotation> {
        self.draft.as_ref()
    }

    /// Whether a draw is currently in progress.
    pub fn is_drawing(&self) -> bool {
        self.draft.is_some()
    }

    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("anno-{:x}-{}", self.session, self.next_id)
    }

    fn fire_on_change(&mut self) {
        if let Some(ref mut callback) = self.on_change {
            callback(&self.history[self.step]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Engine wired to a callback that records every emitted set.
    fn engine_with_log() -> (AnnotationHistory, Rc<RefCell<Vec<Vec<Annotation>>>>) {
        let log: Rc<RefCell<Vec<Vec<Annotation>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let mut engine = AnnotationHistory::new();
        engine.set_on_change(Box::new(move |set| sink.borrow_mut().push(set.to_vec())));
        (engine, log)
    }

    fn draw_rect(engine: &mut AnnotationHistory, from: (f64, f64), to: (f64, f64), fill: &str) {
        engine.begin_draw(Point::new(from.0, from.1), fill);
        engine.update_draw(Point::new(to.0, to.1));
        engine.end_draw();
    }

    #[test]
    fn test_draw_commit_scenario() {
        let (mut engine, log) = engine_with_log();
        engine.reset(Vec::new());

        engine.begin_draw(Point::new(10.0, 10.0), "#f00");
        engine.update_draw(Point::new(50.0, 60.0));
        engine.end_draw();

        let committed = engine.committed();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].x, 10.0);
        assert_eq!(committed[0].y, 10.0);
        assert_eq!(committed[0].width, 40.0);
        assert_eq!(committed[0].height, 50.0);
        assert_eq!(committed[0].fill, "#f00");
        assert_eq!(log.borrow().len(), 1);

        engine.undo();
        assert!(engine.committed().is_empty());
        assert_eq!(log.borrow().last().unwrap().len(), 0);

        engine.redo();
        assert_eq!(engine.committed(), &log.borrow()[0][..]);
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_each_commit_appends_exactly_one() {
        let (mut engine, _log) = engine_with_log();
        for i in 0..5 {
            let origin = (i as f64 * 10.0, i as f64 * 10.0);
            let corner = (origin.0 + 20.0, origin.1 + 20.0);
            draw_rect(&mut engine, origin, corner, "#abc");
            assert_eq!(engine.committed().len(), i + 1);
        }
        // Earlier snapshots stay reachable one undo at a time.
        for expected in (0..5).rev() {
            engine.undo();
            assert_eq!(engine.committed().len(), expected);
        }
    }

    #[test]
    fn test_undo_then_redo_restores_state() {
        let (mut engine, _log) = engine_with_log();
        draw_rect(&mut engine, (0.0, 0.0), (30.0, 30.0), "#111");
        draw_rect(&mut engine, (40.0, 40.0), (80.0, 90.0), "#222");

        let before: Vec<Annotation> = engine.committed().to_vec();
        assert!(engine.can_undo());

        engine.undo();
        assert_ne!(engine.committed(), &before[..]);
        engine.redo();
        assert_eq!(engine.committed(), &before[..]);
        assert!(!engine.can_redo());
    }

    #[test]
    fn test_new_draw_after_undo_discards_redo_tail() {
        let (mut engine, _log) = engine_with_log();
        draw_rect(&mut engine, (0.0, 0.0), (30.0, 30.0), "#111");
        draw_rect(&mut engine, (40.0, 40.0), (80.0, 90.0), "#222");

        engine.undo();
        assert!(engine.can_redo());

        draw_rect(&mut engine, (5.0, 5.0), (25.0, 25.0), "#333");
        assert!(!engine.can_redo());
        assert_eq!(engine.committed().len(), 2);
        assert_eq!(engine.committed()[1].fill, "#333");
    }

    #[test]
    fn test_micro_drag_is_discarded() {
        let (mut engine, log) = engine_with_log();

        // Wide enough but not tall enough.
        engine.begin_draw(Point::new(10.0, 10.0), "#f00");
        engine.update_draw(Point::new(50.0, 11.5));
        engine.end_draw();
        assert!(engine.committed().is_empty());
        assert!(!engine.can_undo());

        // Exactly at the threshold still fails; the rule is strict.
        engine.begin_draw(Point::new(0.0, 0.0), "#f00");
        engine.update_draw(Point::new(2.0, 2.0));
        engine.end_draw();
        assert!(engine.committed().is_empty());

        // A bare click never commits.
        engine.begin_draw(Point::new(5.0, 5.0), "#f00");
        engine.end_draw();
        assert!(engine.committed().is_empty());

        assert!(log.borrow().is_empty());
        assert!(!engine.is_drawing());
    }

    #[test]
    fn test_undo_redo_at_bounds_are_noops() {
        let (mut engine, log) = engine_with_log();

        engine.undo();
        engine.redo();
        assert!(log.borrow().is_empty());

        draw_rect(&mut engine, (0.0, 0.0), (30.0, 30.0), "#111");
        engine.redo();
        assert_eq!(log.borrow().len(), 1);

        engine.undo();
        engine.undo();
        engine.undo();
        assert_eq!(log.borrow().len(), 2);
        assert!(engine.committed().is_empty());
    }

    #[test]
    fn test_reset_isolates_images() {
        let (mut engine, log) = engine_with_log();
        draw_rect(&mut engine, (0.0, 0.0), (30.0, 30.0), "#111");
        draw_rect(&mut engine, (40.0, 40.0), (80.0, 90.0), "#222");

        let seeded = vec![Annotation {
            id: "anno-stored-1".to_string(),
            x: 1.0,
            y: 2.0,
            width: 10.0,
            height: 10.0,
            fill: "#abc".to_string(),
        }];
        engine.reset(seeded.clone());

        assert_eq!(engine.committed(), &seeded[..]);
        assert!(!engine.can_undo());
        assert!(!engine.can_redo());

        // Nothing from the previous image can be resurrected.
        let calls_before = log.borrow().len();
        engine.undo();
        assert_eq!(engine.committed(), &seeded[..]);
        assert_eq!(log.borrow().len(), calls_before);
    }

    #[test]
    fn test_stray_pointer_events_are_tolerated() {
        let (mut engine, log) = engine_with_log();

        // Move and release with no draw in progress.
        engine.update_draw(Point::new(100.0, 100.0));
        engine.end_draw();
        assert!(engine.committed().is_empty());
        assert!(log.borrow().is_empty());

        // A second press while drawing keeps the original draft.
        engine.begin_draw(Point::new(10.0, 10.0), "#111");
        engine.begin_draw(Point::new(99.0, 99.0), "#222");
        engine.update_draw(Point::new(40.0, 40.0));
        engine.end_draw();
        assert_eq!(engine.committed().len(), 1);
        assert_eq!(engine.committed()[0].x, 10.0);
        assert_eq!(engine.committed()[0].fill, "#111");
    }

    #[test]
    fn test_draft_is_visible_but_uncommitted() {
        let (mut engine, log) = engine_with_log();
        engine.begin_draw(Point::new(10.0, 10.0), "#f00");
        engine.update_draw(Point::new(-20.0, -30.0));

        assert!(engine.is_drawing());
        assert_eq!(engine.visible_annotations().count(), 1);
        assert!(engine.committed().is_empty());
        assert!(log.borrow().is_empty());

        let draft = engine.visible_annotations().next().unwrap();
        assert_eq!(draft.width, -30.0);
        assert_eq!(draft.height, -40.0);

        // Negative extents commit like any other rectangle.
        engine.end_draw();
        assert_eq!(engine.committed().len(), 1);
        assert_eq!(engine.committed()[0].width, -30.0);
        assert_eq!(engine.visible_annotations().count(), 1);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let (mut engine, _log) = engine_with_log();
        for i in 0..10 {
            let origin = (i as f64, i as f64);
            draw_rect(&mut engine, origin, (origin.0 + 10.0, origin.1 + 10.0), "#111");
        }
        let mut ids: Vec<&str> = engine.committed().iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_callback_registration_survives_reset() {
        let (mut engine, log) = engine_with_log();
        engine.reset(Vec::new());
        draw_rect(&mut engine, (0.0, 0.0), (30.0, 30.0), "#111");
        assert_eq!(log.borrow().len(), 1);
    }
}
