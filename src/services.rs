//! Interfaces to the editor's external collaborators: recognition and
//! generation providers, the interactive link-target chooser, and the
//! observer hooks the shell registers. The core only knows it can
//! submit a region and get back a string or an image reference,
//! fallibly.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;

use egui::Rect;
use log::{info, warn};
use thiserror::Error;
use uuid::Uuid;

use crate::element::PlannerElement;

/// Failure reported by an external provider.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("service produced no result")]
    NoResult,

    #[error("service rejected the request: {0}")]
    Rejected(String),

    #[error("service timed out")]
    Timeout,

    /// Microphone/camera style resource failures: reported
    /// immediately, the initiating action aborts with no partial
    /// state change.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),
}

/// RGBA raster handed to recognition/generation providers.
#[derive(Debug, Clone, PartialEq)]
pub struct InkBitmap {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl InkBitmap {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }
}

/// Turns rendered ink into text.
pub trait HandwritingRecognizer {
    fn recognize(&self, bitmap: &InkBitmap) -> Result<String, ServiceError>;
}

/// Turns rendered ink into generated artwork, returning an image
/// reference (URL or data URI).
pub trait ArtworkGenerator {
    fn generate(&self, bitmap: &InkBitmap, prompt: &str, style: &str)
    -> Result<String, ServiceError>;
}

/// Turns recorded audio into text.
pub trait AudioTranscriber {
    fn transcribe(&self, audio: &[u8]) -> Result<String, ServiceError>;
}

/// Outcome of the interactive "choose a link target" flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkChoice {
    Page(usize),
    Url(String),
    Cancelled,
}

/// Presents the link-target chooser for a candidate hotspot rect.
pub trait LinkTargetResolver {
    fn resolve(&self, candidate: Rect) -> LinkChoice;
}

/// Page-level activity surfaced to the shell's save indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    /// An AI conversion is in flight.
    Processing,
}

/// Outward notification hooks. All methods default to no-ops so
/// observers implement only what they watch.
pub trait EditorObserver {
    fn selection_changed(&mut self, _element: Option<&PlannerElement>) {}
    fn saving_state_changed(&mut self, _status: SaveStatus) {}
    /// Fire-and-forget persistence signal; debouncing is the
    /// observer's concern.
    fn persist_page(&mut self, _page_id: Uuid, _elements: &[PlannerElement]) {}
}

/// OCR job posted across the worker boundary.
#[derive(Debug)]
pub struct OcrRequest {
    pub page_id: Uuid,
    pub bitmap: InkBitmap,
}

/// Completed OCR job, keyed by page so stale results route to the
/// right page record (or are ignored if that page is gone).
#[derive(Debug)]
pub struct OcrOutcome {
    pub page_id: Uuid,
    pub result: Result<String, ServiceError>,
}

/// Message-passing actor wrapping a [`HandwritingRecognizer`] on its
/// own thread: bitmaps in, text-or-failure out. The interactive
/// thread never blocks on it; outcomes are drained opportunistically
/// each frame via [`OcrWorker::poll`].
pub struct OcrWorker {
    requests: Sender<OcrRequest>,
    outcomes: Receiver<OcrOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl OcrWorker {
    pub fn spawn<R>(recognizer: R) -> Self
    where
        R: HandwritingRecognizer + Send + 'static,
    {
        let (request_tx, request_rx) = channel::<OcrRequest>();
        let (outcome_tx, outcome_rx) = channel::<OcrOutcome>();
        let handle = std::thread::Builder::new()
            .name("ocr-worker".to_owned())
            .spawn(move || {
                while let Ok(request) = request_rx.recv() {
                    let result = recognizer.recognize(&request.bitmap);
                    let outcome = OcrOutcome {
                        page_id: request.page_id,
                        result,
                    };
                    if outcome_tx.send(outcome).is_err() {
                        break;
                    }
                }
                info!("ocr worker shutting down");
            })
            .expect("failed to spawn ocr worker thread");

        Self {
            requests: request_tx,
            outcomes: outcome_rx,
            handle: Some(handle),
        }
    }

    /// Queue a page raster for recognition. Returns false if the
    /// worker has gone away.
    pub fn submit(&self, request: OcrRequest) -> bool {
        match self.requests.send(request) {
            Ok(()) => true,
            Err(_) => {
                warn!("ocr worker unavailable, dropping request");
                false
            }
        }
    }

    /// Drain every finished job without blocking.
    pub fn poll(&self) -> Vec<OcrOutcome> {
        self.outcomes.try_iter().collect()
    }
}

impl Drop for OcrWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        let (dead_tx, _) = channel();
        self.requests = dead_tx;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
