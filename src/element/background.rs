use egui::Color32;
use serde::{Deserialize, Serialize};

use super::common::ElementCommon;

/// How the page background is filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "fill")]
pub enum BackgroundFill {
    /// Flat color.
    Solid { color: Color32 },
    /// Image tiled at its natural size.
    Texture { src: String },
    /// Image stretched to the page dimensions.
    Image { src: String },
}

/// Page-level fill. Stored in the element array like everything else
/// but logically sits at z-index -1: the renderer draws it first and
/// hit-testing, selection, and the eraser all skip it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    #[serde(flatten)]
    pub fill: BackgroundFill,
}

impl BackgroundElement {
    pub fn solid(id: u64, color: Color32) -> Self {
        Self {
            common: ElementCommon::new(id, 0.0, 0.0),
            fill: BackgroundFill::Solid { color },
        }
    }
}
