use egui::{Color32, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

use super::common::{self, ElementCommon};

/// Geometric shape variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Diamond,
    Polygon { sides: u32 },
    Star,
    Line,
    Arrow,
}

/// A boxed geometric shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    pub shape: ShapeKind,
    pub width: f32,
    pub height: f32,
    pub stroke_color: Color32,
    pub fill_color: Color32,
    pub stroke_width: f32,
    pub filled: bool,
}

impl ShapeElement {
    pub fn new(id: u64, shape: ShapeKind, origin: egui::Pos2) -> Self {
        Self {
            common: ElementCommon::new(id, origin.x, origin.y),
            shape,
            width: 0.0,
            height: 0.0,
            stroke_color: Color32::BLACK,
            fill_color: Color32::TRANSPARENT,
            stroke_width: 2.0,
            filled: false,
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

    /// Rubber-band resize while the shape tool is dragging: width and
    /// height track the pointer and may be transiently negative.
    pub fn drag_to(&mut self, origin: egui::Pos2, current: egui::Pos2) {
        self.common.x = origin.x.min(current.x);
        self.common.y = origin.y.min(current.y);
        self.width = (current.x - origin.x).abs();
        self.height = (current.y - origin.y).abs();
    }
}
