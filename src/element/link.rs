use egui::{Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

use super::common::{self, ElementCommon};

/// Where a link hotspot leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// Jump to another page of the planner by index.
    Page(usize),
    /// Open an external URL.
    Url(String),
}

/// Invisible tappable rectangle that navigates to a page or URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    pub width: f32,
    pub height: f32,
    pub target: LinkTarget,
    #[serde(default)]
    pub note: Option<String>,
}

impl LinkElement {
    pub fn new(id: u64, rect: Rect, target: LinkTarget) -> Self {
        Self {
            common: ElementCommon::new(id, rect.min.x, rect.min.y),
            width: rect.width(),
            height: rect.height(),
            target,
            note: None,
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

/// Derived handwriting transcription for a page. Not rendered; kept in
/// the element array so it serializes with everything else and is
/// picked up by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrMetadataElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    pub text: String,
}

impl OcrMetadataElement {
    pub fn new(id: u64, text: String) -> Self {
        Self {
            common: ElementCommon::new(id, 0.0, 0.0),
            text,
        }
    }
}
