use egui::{Color32, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

use super::common::{self, ElementCommon};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font styling toggles applied to the whole text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FontStyle {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

/// A block of typed text. Lines may carry list or checkbox prefixes
/// (`•`, `N.`, `▪`, `[ ]`/`[x]`/`[-]`); that prefix text is the only
/// record of list/checkbox state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    pub content: String,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub font_family: String,
    #[serde(default)]
    pub style: FontStyle,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub background: Option<Color32>,
    #[serde(default)]
    pub border: Option<Color32>,
}

impl TextElement {
    pub fn new(id: u64, position: egui::Pos2) -> Self {
        Self {
            common: ElementCommon::new(id, position.x, position.y),
            content: String::new(),
            width: 160.0,
            height: 40.0,
            font_size: 16.0,
            font_family: "sans-serif".to_owned(),
            style: FontStyle::default(),
            align: TextAlign::Left,
            background: None,
            border: None,
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

    /// The line containing character offset `caret`, as a line index.
    pub fn line_at_caret(&self, caret: usize) -> usize {
        let clamped = caret.min(self.content.len());
        self.content[..clamped].matches('\n').count()
    }
}
