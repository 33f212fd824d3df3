use egui::{Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

use super::common::{self, ElementCommon};

/// Bitmap content placed on the page. Used for both the `image` and
/// `sticker` kinds; the discriminant lives on the element enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Source reference: URL or data URI.
    pub src: String,
    pub width: f32,
    pub height: f32,
    /// Frame-clock second at which the element was inserted by an
    /// ink-to-art replacement; drives the renderer's opacity fade-in.
    /// Transient, never serialized.
    #[serde(skip)]
    pub inserted_at: Option<f64>,
}

impl MediaElement {
    pub fn new(id: u64, src: String, rect: Rect) -> Self {
        Self {
            common: ElementCommon::new(id, rect.min.x, rect.min.y),
            src,
            width: rect.width(),
            height: rect.height(),
            inserted_at: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(
            pos2(self.common.x, self.common.y),
            Vec2::new(self.width, self.height),
        )
    }

    pub fn set_bounds(&mut self, rect: Rect) {
        let rect = common::sanitize_rect(rect);
        self.common.x = rect.min.x;
        self.common.y = rect.min.y;
        self.width = rect.width();
        self.height = rect.height();
    }
}

/// A recorded voice note anchored to a point on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Audio source reference.
    pub src: String,
    pub duration_secs: f32,
    /// Transcription text, filled in asynchronously when the user
    /// requests it.
    #[serde(default)]
    pub transcript: Option<String>,
}

/// Rendered size of the voice-note glyph, used for bounds and picking.
pub const VOICE_BADGE_SIZE: f32 = 32.0;

impl VoiceElement {
    pub fn new(id: u64, src: String, duration_secs: f32, anchor: egui::Pos2) -> Self {
        Self {
            common: ElementCommon::new(id, anchor.x, anchor.y),
            src,
            duration_secs,
            transcript: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(
            pos2(self.common.x, self.common.y),
            Vec2::splat(VOICE_BADGE_SIZE),
        )
    }
}
