use std::sync::Arc;
use std::time::Instant;

use egui::{Pos2, Rect};
use log::{info, warn};
use parking_lot::Mutex;

use crate::capture::{CaptureJob, CapturePipeline, PageRasterizer, encode_png};
use crate::element::{Element, PlannerElement, factory};
use crate::error::EditorError;
use crate::history::History;
use crate::input::{
    GestureContext, GestureEvent, GestureInterpreter, PageNavigation, TouchPoint,
};
use crate::page::Page;
use crate::selection::Selection;
use crate::services::{
    ArtworkGenerator, AudioTranscriber, EditorObserver, HandwritingRecognizer, LinkChoice,
    OcrRequest, OcrWorker, SaveStatus,
};
use crate::text_format::{self, ListStyle};
use crate::tools::{ActiveTool, ToolContext, ToolEffect, ToolKind, ToolSettings};
use crate::viewport::Viewport;

/// Render scale for stored page thumbnails.
const THUMBNAIL_SCALE: f32 = 0.25;
/// Render scale for the ink raster posted to OCR.
const OCR_SCALE: f32 = 2.0;
/// Seconds over which AI-generated artwork fades in.
pub const ART_FADE_IN_SECS: f64 = 0.7;

/// Result of an ink conversion flow. Expected failure modes resolve
/// here instead of as errors: an empty or ink-free selection is a
/// no-op, and a rejected AI call leaves the source ink untouched with
/// a message in [`PlannerEditor::last_error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The selected ink was replaced; the new element's id.
    Replaced(u64),
    /// The selection contained no path elements.
    NoInkSelected,
    /// The provider failed; nothing changed.
    Failed,
}

/// The single mutable editor store: pages, viewport, selection,
/// history, tool state, and the background pipelines. Owned by the
/// UI event loop; every public mutating operation completes
/// synchronously, so the model is consistent the moment it returns.
pub struct PlannerEditor {
    pages: Vec<Page>,
    active_page: usize,
    pub viewport: Viewport,
    history: History,
    selection: Selection,
    tool: ActiveTool,
    pub settings: ToolSettings,
    gestures: GestureInterpreter,
    capture: CapturePipeline,
    save_status: Arc<Mutex<SaveStatus>>,
    observers: Vec<Box<dyn EditorObserver>>,
    ocr: Option<OcrWorker>,
    /// Text element currently in edit mode; at most one at a time.
    text_edit: Option<u64>,
    text_edit_dirty: bool,
    pending_link: Option<Rect>,
    last_error: Option<String>,
    epoch: Instant,
    frame_now: Instant,
}

impl Default for PlannerEditor {
    fn default() -> Self {
        Self::new(Page::new(768.0, 1024.0))
    }
}

impl PlannerEditor {
    pub fn new(first_page: Page) -> Self {
        let now = Instant::now();
        let mut capture = CapturePipeline::default();
        capture.reset_for_page(&first_page);
        Self {
            pages: vec![first_page],
            active_page: 0,
            viewport: Viewport::default(),
            history: History::new(),
            selection: Selection::default(),
            tool: ActiveTool::for_kind(ToolKind::Select),
            settings: ToolSettings::default(),
            gestures: GestureInterpreter::default(),
            capture,
            save_status: Arc::new(Mutex::new(SaveStatus::Idle)),
            observers: Vec::new(),
            ocr: None,
            text_edit: None,
            text_edit_dirty: false,
            pending_link: None,
            last_error: None,
            epoch: now,
            frame_now: now,
        }
    }

    // ---- wiring -----------------------------------------------------

    pub fn add_observer(&mut self, observer: Box<dyn EditorObserver>) {
        self.observers.push(observer);
    }

    pub fn attach_ocr_worker(&mut self, worker: OcrWorker) {
        self.ocr = Some(worker);
    }

    /// Shared save-status cell for the shell's indicator.
    pub fn save_status_cell(&self) -> Arc<Mutex<SaveStatus>> {
        Arc::clone(&self.save_status)
    }

    /// Most recent user-visible failure message, cleared on read.
    pub fn take_last_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    // ---- pages ------------------------------------------------------

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn active_page_index(&self) -> usize {
        self.active_page
    }

    pub fn active_page(&self) -> &Page {
        &self.pages[self.active_page]
    }

    /// Direct mutable page access for the shell's overlay layer.
    /// Mutations made through this skip the capture/persist
    /// bookkeeping; follow them with [`PlannerEditor::mark_modified`].
    pub fn active_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.active_page]
    }

    /// Append a page created by the external page-management layer.
    pub fn push_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn set_active_page(&mut self, index: usize) -> Result<(), EditorError> {
        if index >= self.pages.len() {
            return Err(EditorError::PageNotFound(index));
        }
        if index != self.active_page {
            self.active_page = index;
            self.finish_text_edit();
            self.selection.clear();
            self.history.clear();
            self.capture.reset_for_page(&self.pages[index]);
            self.notify_selection();
            info!("switched to page {index}");
        }
        Ok(())
    }

    pub fn navigate(&mut self, direction: PageNavigation) {
        let target = match direction {
            PageNavigation::Next => self.active_page.saturating_add(1),
            PageNavigation::Previous => self.active_page.saturating_sub(1),
        };
        if target < self.pages.len() {
            let _ = self.set_active_page(target);
        }
    }

    // ---- tool & selection -------------------------------------------

    pub fn tool_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    pub fn tool(&self) -> &ActiveTool {
        &self.tool
    }

    pub fn set_tool(&mut self, kind: ToolKind) {
        if kind == self.tool.kind() {
            return;
        }
        self.finish_text_edit();
        self.tool = ActiveTool::for_kind(kind);
        info!("tool changed to {kind:?}");
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // ---- frame loop -------------------------------------------------

    /// Record the frame timestamp; pointer events dispatched after
    /// this are stamped with it.
    pub fn begin_frame(&mut self, now: Instant) {
        self.frame_now = now;
    }

    /// Apply throttled gesture output, run due capture jobs, and
    /// drain finished OCR work. Call once per frame, after input.
    pub fn end_frame(&mut self, now: Instant, rasterizer: &dyn PageRasterizer) {
        if let Some(update) = self.gestures.take_viewport_update() {
            self.viewport.zoom_by(update.scale);
            self.viewport.rotate_by(update.rotation);
            self.viewport.pan_by(update.pan);
        }

        for job in self.capture.take_due_jobs(now) {
            match job {
                CaptureJob::Thumbnail => {
                    let page = &self.pages[self.active_page];
                    let bitmap = rasterizer.rasterize(page, THUMBNAIL_SCALE, false);
                    let png = encode_png(&bitmap);
                    self.pages[self.active_page].thumbnail = png;
                    info!("thumbnail captured for page {}", self.active_page);
                }
                CaptureJob::Ocr => {
                    let page = &self.pages[self.active_page];
                    if page.ink_path_count() == 0 {
                        continue;
                    }
                    if let Some(worker) = &self.ocr {
                        let bitmap = rasterizer.rasterize(page, OCR_SCALE, true);
                        worker.submit(OcrRequest {
                            page_id: page.id,
                            bitmap,
                        });
                    }
                }
            }
        }

        self.apply_ocr_outcomes();
    }

    /// Write back finished OCR jobs. Results are keyed by page id:
    /// a result for a page that is no longer active still lands on
    /// that page's stored metadata, and one for a deleted page is
    /// dropped without error.
    fn apply_ocr_outcomes(&mut self) {
        let Some(worker) = &self.ocr else {
            return;
        };
        for outcome in worker.poll() {
            match outcome.result {
                Ok(text) => {
                    if let Some(page) = self.pages.iter_mut().find(|p| p.id == outcome.page_id) {
                        page.set_ocr_text(text);
                    }
                }
                Err(err) => warn!("ocr failed for page {}: {err}", outcome.page_id),
            }
        }
    }

    // ---- input ------------------------------------------------------

    pub fn pointer_down(&mut self, screen: Pos2) {
        let canvas = self.viewport.screen_to_canvas(screen);
        self.with_tool(|tool, ctx| tool.on_pointer_down(canvas, ctx));
    }

    pub fn pointer_move(&mut self, screen: Pos2) {
        let canvas = self.viewport.screen_to_canvas(screen);
        self.with_tool(|tool, ctx| tool.on_pointer_move(canvas, ctx));
    }

    pub fn pointer_up(&mut self, screen: Pos2) {
        let canvas = self.viewport.screen_to_canvas(screen);
        self.with_tool(|tool, ctx| tool.on_pointer_up(canvas, ctx));
    }

    pub fn cancel_active_drag(&mut self) {
        self.with_tool(|tool, ctx| tool.cancel(ctx));
    }

    /// Feed a batch of touch points through the gesture interpreter.
    pub fn handle_touches(&mut self, touches: &[TouchPoint]) {
        let ctx = GestureContext {
            two_finger_enabled: self.tool.kind() == ToolKind::Select,
            swipe_enabled: self.viewport.is_at_rest_zoom() && self.selection.is_empty(),
        };
        let events = self.gestures.handle_touches(touches, ctx);
        for event in events {
            match event {
                GestureEvent::ToolPointerDown(pos) => self.pointer_down(pos),
                GestureEvent::ToolPointerMove(pos) => self.pointer_move(pos),
                GestureEvent::ToolPointerUp(pos) => self.pointer_up(pos),
                GestureEvent::CancelActiveDrag => self.cancel_active_drag(),
                GestureEvent::Navigate(direction) => self.navigate(direction),
            }
        }
    }

    fn with_tool(&mut self, f: impl FnOnce(&mut ActiveTool, &mut ToolContext<'_>)) {
        let mut effects = Vec::new();
        {
            let mut ctx = ToolContext {
                page: &mut self.pages[self.active_page],
                history: &mut self.history,
                selection: &mut self.selection,
                settings: &self.settings,
                effects: &mut effects,
            };
            f(&mut self.tool, &mut ctx);
        }
        self.drain_effects(effects);
    }

    fn drain_effects(&mut self, effects: Vec<ToolEffect>) {
        let mut modified = false;
        for effect in effects {
            match effect {
                ToolEffect::PageModified => modified = true,
                ToolEffect::SelectionChanged => self.notify_selection(),
                ToolEffect::RequestLinkTarget(rect) => self.pending_link = Some(rect),
                ToolEffect::BeginTextEdit(id) => {
                    self.text_edit = Some(id);
                    self.text_edit_dirty = false;
                }
            }
        }
        if modified {
            self.mark_modified();
        }
    }

    /// Bookkeeping after any element-list mutation: restart the
    /// capture debounces and raise the persist hook.
    pub fn mark_modified(&mut self) {
        let page = &self.pages[self.active_page];
        self.capture.note_page_changed(page, self.frame_now);
        let page_id = page.id;
        let elements = page.elements().to_vec();
        for observer in &mut self.observers {
            observer.persist_page(page_id, &elements);
        }
    }

    fn notify_selection(&mut self) {
        let element = self
            .selection
            .ids()
            .first()
            .and_then(|&id| self.pages[self.active_page].find_element(id))
            .cloned();
        for observer in &mut self.observers {
            observer.selection_changed(element.as_ref());
        }
    }

    fn set_status(&mut self, status: SaveStatus) {
        *self.save_status.lock() = status;
        for observer in &mut self.observers {
            observer.saving_state_changed(status);
        }
    }

    // ---- editing operations -----------------------------------------

    pub fn undo(&mut self) {
        self.history.undo(&mut self.pages[self.active_page]);
        self.selection.recompute(&self.pages[self.active_page]);
        self.mark_modified();
    }

    pub fn redo(&mut self) {
        self.history.redo(&mut self.pages[self.active_page]);
        self.selection.recompute(&self.pages[self.active_page]);
        self.mark_modified();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Delete every selected element. Locked elements survive and the
    /// whole deletion is one history step.
    pub fn delete_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.history.save(&self.pages[self.active_page]);
        let ids: Vec<u64> = self.selection.ids().to_vec();
        for id in ids {
            self.pages[self.active_page].remove_element(id);
        }
        self.selection.recompute(&self.pages[self.active_page]);
        self.notify_selection();
        self.mark_modified();
    }

    pub fn bring_selection_to_front(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.history.save(&self.pages[self.active_page]);
        for id in self.selection.ids().to_vec() {
            self.pages[self.active_page].bring_to_front(id);
        }
        self.mark_modified();
    }

    pub fn send_selection_to_back(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.history.save(&self.pages[self.active_page]);
        for id in self.selection.ids().to_vec() {
            self.pages[self.active_page].send_to_back(id);
        }
        self.mark_modified();
    }

    pub fn set_element_locked(&mut self, id: u64, locked: bool) {
        if let Some(element) = self.pages[self.active_page].find_element_mut(id) {
            element.set_locked(locked);
            self.mark_modified();
        }
    }

    /// Transform-end hook: fold any proportional scale applied by the
    /// gizmo back into element dimensions so the stored model stays
    /// resolution-independent.
    pub fn normalize_selection_transform(&mut self) {
        let page = &self.pages[self.active_page];
        let needs_it = self.selection.ids().iter().any(|&id| {
            page.find_element(id)
                .is_some_and(|e| e.common().scale_x != 1.0 || e.common().scale_y != 1.0)
        });
        if !needs_it {
            return;
        }
        for id in self.selection.ids().to_vec() {
            if let Some(element) = self.pages[self.active_page].find_element_mut(id) {
                element.normalize_scale();
            }
        }
        self.selection.recompute(&self.pages[self.active_page]);
        self.mark_modified();
    }

    // ---- text editing -----------------------------------------------

    pub fn editing_text(&self) -> Option<u64> {
        self.text_edit
    }

    pub fn finish_text_edit(&mut self) {
        if let ActiveTool::Text(tool) = &mut self.tool {
            tool.finish_editing();
        }
        self.text_edit = None;
        self.text_edit_dirty = false;
    }

    /// Replace the content of the text element under edit. The first
    /// change of a session takes the history snapshot.
    pub fn update_text_content(&mut self, content: String) {
        let Some(id) = self.text_edit else {
            return;
        };
        if !self.text_edit_dirty {
            self.history.save(&self.pages[self.active_page]);
            self.text_edit_dirty = true;
        }
        if let Some(text) = self.pages[self.active_page]
            .find_element_mut(id)
            .and_then(|e| e.as_text_mut())
        {
            text.content = content;
            self.mark_modified();
        }
    }

    /// Apply a list/checkbox style. With an edit session active the
    /// line under the caret is reformatted (numbering continues from
    /// the previous line); otherwise the whole content of the single
    /// selected text element is.
    pub fn toggle_list_style(&mut self, style: ListStyle, caret: Option<usize>) {
        let target = self.text_edit.or_else(|| {
            self.selection.ids().iter().copied().find(|&id| {
                self.pages[self.active_page]
                    .find_element(id)
                    .is_some_and(|e| e.as_text().is_some())
            })
        });
        let Some(id) = target else {
            return;
        };
        self.history.save(&self.pages[self.active_page]);
        if let Some(text) = self.pages[self.active_page]
            .find_element_mut(id)
            .and_then(|e| e.as_text_mut())
        {
            text.content = match (self.text_edit, caret) {
                (Some(_), Some(caret)) => {
                    let line = text.line_at_caret(caret);
                    text_format::apply_list_style_to_line(&text.content, line, style)
                }
                _ => text_format::apply_list_style(&text.content, style),
            };
            self.mark_modified();
        }
    }

    /// Advance the checkbox on `line_index` of a rendered text
    /// element through empty → completed → failed → empty.
    pub fn cycle_checkbox(&mut self, element_id: u64, line_index: usize) {
        let Some(current) = self.pages[self.active_page]
            .find_element(element_id)
            .and_then(|e| e.as_text())
            .map(|t| t.content.clone())
        else {
            return;
        };
        let Some(updated) = text_format::cycle_checkbox_at_line(&current, line_index) else {
            return;
        };
        self.history.save(&self.pages[self.active_page]);
        if let Some(text) = self.pages[self.active_page]
            .find_element_mut(element_id)
            .and_then(|e| e.as_text_mut())
        {
            text.content = updated;
            self.mark_modified();
        }
    }

    // ---- links ------------------------------------------------------

    /// Rubber-band rect awaiting a link target, handed to the shell's
    /// modal flow.
    pub fn take_pending_link(&mut self) -> Option<Rect> {
        self.pending_link.take()
    }

    /// Insert the hotspot once the external chooser resolves. A
    /// cancelled chooser inserts nothing.
    pub fn create_link(&mut self, rect: Rect, choice: LinkChoice) {
        let target = match choice {
            LinkChoice::Page(index) => crate::element::LinkTarget::Page(index),
            LinkChoice::Url(url) => crate::element::LinkTarget::Url(url),
            LinkChoice::Cancelled => return,
        };
        self.history.save(&self.pages[self.active_page]);
        let id = self.pages[self.active_page].allocate_id();
        self.pages[self.active_page].add_element(factory::create_link(id, rect, target));
        self.mark_modified();
    }

    // ---- AI conversion flows ----------------------------------------

    /// Ids of the selected `path` elements only. Typed text and
    /// images never enter the conversion flows even when selected;
    /// the filter is by content type, not by bounding box.
    fn selected_ink(&self) -> Vec<u64> {
        let page = &self.pages[self.active_page];
        self.selection
            .ids()
            .iter()
            .copied()
            .filter(|&id| page.find_element(id).is_some_and(|e| e.is_path()))
            .collect()
    }

    fn ink_bounds(&self, ids: &[u64]) -> Option<Rect> {
        let page = &self.pages[self.active_page];
        let mut union: Option<Rect> = None;
        for &id in ids {
            let rect = page.find_element(id)?.bounds();
            union = Some(match union {
                Some(u) => u.union(rect),
                None => rect,
            });
        }
        union
    }

    /// Replace the selected ink with recognized text, centered on the
    /// original selection bounds, in one history step. On failure the
    /// ink is untouched and the message lands in `last_error`.
    pub fn convert_ink_to_text(
        &mut self,
        recognizer: &dyn HandwritingRecognizer,
        rasterizer: &dyn PageRasterizer,
    ) -> ConversionOutcome {
        let ink = self.selected_ink();
        let Some(bounds) = self.ink_bounds(&ink).filter(|_| !ink.is_empty()) else {
            return ConversionOutcome::NoInkSelected;
        };

        // Status must clear on every exit path below.
        self.set_status(SaveStatus::Processing);
        let bitmap = rasterizer.rasterize_elements(&self.pages[self.active_page], &ink);
        let result = recognizer.recognize(&bitmap);
        self.set_status(SaveStatus::Idle);

        match result {
            Ok(recognized) => {
                self.history.save(&self.pages[self.active_page]);
                let page = &mut self.pages[self.active_page];
                for &id in &ink {
                    page.remove_element(id);
                }
                let id = page.allocate_id();
                let mut element = factory::create_text(id, bounds.min);
                if let PlannerElement::Text(text) = &mut element {
                    text.content = recognized;
                    text.width = bounds.width().max(crate::element::MIN_ELEMENT_SIZE);
                    text.height = bounds.height().max(crate::element::MIN_ELEMENT_SIZE);
                    let rect = Rect::from_center_size(bounds.center(), egui::Vec2::new(text.width, text.height));
                    text.set_bounds(rect);
                }
                page.add_element(element);
                self.selection.replace(vec![id]);
                self.selection.recompute(&self.pages[self.active_page]);
                self.notify_selection();
                self.mark_modified();
                info!("ink-to-text replaced {} path(s)", ink.len());
                ConversionOutcome::Replaced(id)
            }
            Err(err) => {
                warn!("ink-to-text failed: {err}");
                self.last_error = Some(format!("Handwriting recognition failed: {err}"));
                ConversionOutcome::Failed
            }
        }
    }

    /// Replace the selected ink with generated artwork filling the
    /// original bounds, fading in over [`ART_FADE_IN_SECS`].
    pub fn convert_ink_to_art(
        &mut self,
        generator: &dyn ArtworkGenerator,
        rasterizer: &dyn PageRasterizer,
        prompt: &str,
        style: &str,
    ) -> ConversionOutcome {
        let ink = self.selected_ink();
        let Some(bounds) = self.ink_bounds(&ink).filter(|_| !ink.is_empty()) else {
            return ConversionOutcome::NoInkSelected;
        };

        self.set_status(SaveStatus::Processing);
        let bitmap = rasterizer.rasterize_elements(&self.pages[self.active_page], &ink);
        let result = generator.generate(&bitmap, prompt, style);
        self.set_status(SaveStatus::Idle);

        match result {
            Ok(image_ref) => {
                let inserted_at = self.frame_now.duration_since(self.epoch).as_secs_f64();
                self.history.save(&self.pages[self.active_page]);
                let page = &mut self.pages[self.active_page];
                for &id in &ink {
                    page.remove_element(id);
                }
                let id = page.allocate_id();
                let mut element = factory::create_image(id, image_ref, bounds);
                if let PlannerElement::Image(image) = &mut element {
                    image.inserted_at = Some(inserted_at);
                }
                page.add_element(element);
                self.selection.replace(vec![id]);
                self.selection.recompute(&self.pages[self.active_page]);
                self.notify_selection();
                self.mark_modified();
                ConversionOutcome::Replaced(id)
            }
            Err(err) => {
                warn!("ink-to-art failed: {err}");
                self.last_error = Some(format!("Artwork generation failed: {err}"));
                ConversionOutcome::Failed
            }
        }
    }

    /// Fill in the transcript of a voice note. Provider failures
    /// (mic permission and the like) abort with no state change and a
    /// message in `last_error`; returns whether a transcript landed.
    pub fn transcribe_voice(
        &mut self,
        element_id: u64,
        transcriber: &dyn AudioTranscriber,
        audio: &[u8],
    ) -> bool {
        self.set_status(SaveStatus::Processing);
        let result = transcriber.transcribe(audio);
        self.set_status(SaveStatus::Idle);

        match result {
            Ok(text) => {
                self.history.save(&self.pages[self.active_page]);
                if let Some(PlannerElement::Voice(voice)) =
                    self.pages[self.active_page].find_element_mut(element_id)
                {
                    voice.transcript = Some(text);
                    self.mark_modified();
                    true
                } else {
                    false
                }
            }
            Err(err) => {
                warn!("transcription failed: {err}");
                self.last_error = Some(format!("Transcription failed: {err}"));
                false
            }
        }
    }

    /// Seconds since the editor started, the clock used for the
    /// artwork fade-in.
    pub fn clock_secs(&self) -> f64 {
        self.frame_now.duration_since(self.epoch).as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ShapeKind, factory};
    use crate::services::ServiceError;
    use egui::{Vec2, pos2};
    use std::sync::mpsc::{Sender, channel};

    struct EchoTranscriber;

    impl AudioTranscriber for EchoTranscriber {
        fn transcribe(&self, audio: &[u8]) -> Result<String, ServiceError> {
            if audio.is_empty() {
                return Err(ServiceError::ResourceUnavailable("microphone".to_owned()));
            }
            Ok(format!("{} bytes", audio.len()))
        }
    }

    struct RecordingObserver {
        statuses: Sender<SaveStatus>,
    }

    impl EditorObserver for RecordingObserver {
        fn saving_state_changed(&mut self, status: SaveStatus) {
            let _ = self.statuses.send(status);
        }
    }

    fn editor_with_voice() -> (PlannerEditor, u64) {
        let mut page = Page::new(768.0, 1024.0);
        let id = page.allocate_id();
        page.add_element(factory::create_voice(
            id,
            "asset://audio/memo.ogg".to_owned(),
            4.5,
            pos2(100.0, 100.0),
        ));
        (PlannerEditor::new(page), id)
    }

    #[test]
    fn transcription_fills_voice_element() {
        let (mut editor, id) = editor_with_voice();
        assert!(editor.transcribe_voice(id, &EchoTranscriber, &[1, 2, 3]));

        let Some(PlannerElement::Voice(voice)) = editor.active_page().find_element(id) else {
            panic!("voice element missing");
        };
        assert_eq!(voice.transcript.as_deref(), Some("3 bytes"));
    }

    #[test]
    fn failed_transcription_changes_nothing() {
        let (mut editor, id) = editor_with_voice();
        let before = editor.active_page().elements().to_vec();

        assert!(!editor.transcribe_voice(id, &EchoTranscriber, &[]));
        assert_eq!(editor.active_page().elements(), &before[..]);
        assert!(editor.take_last_error().is_some());
        assert_eq!(*editor.save_status_cell().lock(), SaveStatus::Idle);
    }

    #[test]
    fn processing_status_is_always_cleared() {
        let (mut editor, id) = editor_with_voice();
        let (tx, rx) = channel();
        editor.add_observer(Box::new(RecordingObserver { statuses: tx }));

        editor.transcribe_voice(id, &EchoTranscriber, &[9]);
        let seen: Vec<SaveStatus> = rx.try_iter().collect();
        assert_eq!(seen, vec![SaveStatus::Processing, SaveStatus::Idle]);
    }

    #[test]
    fn cancelled_link_choice_inserts_nothing() {
        let mut editor = PlannerEditor::default();
        let rect = Rect::from_min_size(pos2(10.0, 10.0), Vec2::new(50.0, 30.0));

        editor.create_link(rect, LinkChoice::Cancelled);
        assert!(editor.active_page().elements().is_empty());

        editor.create_link(rect, LinkChoice::Page(2));
        assert_eq!(editor.active_page().elements().len(), 1);
    }

    #[test]
    fn navigation_clamps_at_document_edges() {
        let mut editor = PlannerEditor::default();
        editor.push_page(Page::new(768.0, 1024.0));

        editor.navigate(PageNavigation::Previous);
        assert_eq!(editor.active_page_index(), 0);
        editor.navigate(PageNavigation::Next);
        assert_eq!(editor.active_page_index(), 1);
        editor.navigate(PageNavigation::Next);
        assert_eq!(editor.active_page_index(), 1);
    }

    #[test]
    fn page_switch_resets_selection_and_history() {
        let mut editor = PlannerEditor::default();
        editor.push_page(Page::new(768.0, 1024.0));

        let id = {
            let page = editor.active_page_mut();
            let id = page.allocate_id();
            let mut shape = factory::create_shape(id, ShapeKind::Rectangle, pos2(10.0, 10.0));
            shape.set_bounds(Rect::from_min_size(pos2(10.0, 10.0), Vec2::new(40.0, 40.0)));
            page.add_element(shape);
            id
        };
        editor.mark_modified();
        editor.delete_selection(); // no-op, selection empty
        assert!(editor.active_page().find_element(id).is_some());

        editor.set_active_page(1).unwrap();
        assert!(editor.selection().is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn transform_end_normalizes_scale() {
        let mut editor = PlannerEditor::default();
        let id = {
            let page = editor.active_page_mut();
            let id = page.allocate_id();
            let mut shape = factory::create_shape(id, ShapeKind::Rectangle, pos2(0.0, 0.0));
            shape.set_bounds(Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(40.0, 20.0)));
            page.add_element(shape);
            id
        };
        // The gizmo applied a proportional scale during the gesture.
        if let Some(PlannerElement::Shape(shape)) = editor.active_page_mut().find_element_mut(id) {
            shape.common.scale_x = 2.0;
            shape.common.scale_y = 2.0;
        }
        editor.selection = {
            let mut s = Selection::default();
            s.replace(vec![id]);
            s
        };

        editor.normalize_selection_transform();
        let element = editor.active_page().find_element(id).unwrap();
        assert_eq!(element.common().scale_x, 1.0);
        assert!((element.bounds().width() - 80.0).abs() < 0.01);
        assert!((element.bounds().height() - 40.0).abs() < 0.01);
    }
}
