//! Debounced background capture: thumbnailing and OCR.
//!
//! Both jobs watch the active page and fire only after input settles.
//! Every qualifying change restarts (never queues) the timer, so the
//! only state ever captured is the newest one after a quiet period.

use std::time::{Duration, Instant};

use log::debug;

use crate::page::Page;
use crate::services::InkBitmap;

/// Quiet period after the last element-list change before the page
/// thumbnail is re-captured.
pub const THUMBNAIL_DELAY: Duration = Duration::from_secs(2);

/// Quiet period after the last ink-path-count change before the ink
/// layer is submitted for OCR.
pub const OCR_DELAY: Duration = Duration::from_secs(3);

/// Restart-on-change timer. At most one deadline is live at a time;
/// poking an armed debouncer moves the deadline instead of stacking a
/// second one.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// (Re)arm: the timer now expires `delay` after `now`.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the deadline has passed; disarms.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Capture work that has become due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureJob {
    /// Render the whole page (overlays hidden) to a low-res raster
    /// and store it on the page record.
    Thumbnail,
    /// Render only the ink layer at higher resolution and post it to
    /// the OCR worker.
    Ocr,
}

/// Renders a page region to pixels for the capture jobs. Implemented
/// by the shell, since rasterization is a rendering-layer concern.
pub trait PageRasterizer {
    /// `ink_only` restricts output to path elements (the OCR input);
    /// otherwise the full page renders without UI overlays.
    fn rasterize(&self, page: &Page, scale: f32, ink_only: bool) -> InkBitmap;

    /// Render only the named elements, cropped to their union bounds.
    /// The ink-conversion flows use this to isolate selected strokes.
    fn rasterize_elements(&self, page: &Page, ids: &[u64]) -> InkBitmap;
}

/// Watches one page's mutation stream and schedules the two capture
/// jobs.
#[derive(Debug)]
pub struct CapturePipeline {
    thumbnail: Debouncer,
    ocr: Debouncer,
    last_ink_count: Option<usize>,
}

impl Default for CapturePipeline {
    fn default() -> Self {
        Self {
            thumbnail: Debouncer::new(THUMBNAIL_DELAY),
            ocr: Debouncer::new(OCR_DELAY),
            last_ink_count: None,
        }
    }
}

impl CapturePipeline {
    /// Record that the active page's element list changed. The
    /// thumbnail timer always restarts; the OCR timer restarts only
    /// when the ink-path count moved.
    pub fn note_page_changed(&mut self, page: &Page, now: Instant) {
        self.thumbnail.poke(now);
        let ink_count = page.ink_path_count();
        if self.last_ink_count != Some(ink_count) {
            self.last_ink_count = Some(ink_count);
            self.ocr.poke(now);
            debug!("capture: ocr debounce restarted ({ink_count} ink paths)");
        }
    }

    /// Cancel pending work and rebase on another page (page switch).
    pub fn reset_for_page(&mut self, page: &Page) {
        self.thumbnail.cancel();
        self.ocr.cancel();
        self.last_ink_count = Some(page.ink_path_count());
    }

    /// Jobs whose quiet period has elapsed as of `now`.
    pub fn take_due_jobs(&mut self, now: Instant) -> Vec<CaptureJob> {
        let mut due = Vec::new();
        if self.thumbnail.fire(now) {
            due.push(CaptureJob::Thumbnail);
        }
        if self.ocr.fire(now) {
            due.push(CaptureJob::Ocr);
        }
        due
    }
}

/// Encode a captured raster as PNG for storage on the page record.
pub fn encode_png(bitmap: &InkBitmap) -> Option<Vec<u8>> {
    let img = image::RgbaImage::from_raw(bitmap.width, bitmap.height, bitmap.pixels.clone())?;
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .ok()?;
    Some(bytes)
}
