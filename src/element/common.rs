use egui::{Pos2, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

/// Smallest width/height an element may be resized to.
pub const MIN_ELEMENT_SIZE: f32 = 2.0;

/// Padding added around raw stroke bounds so thin ink stays pickable.
pub const PATH_BASE_PADDING: f32 = 4.0;

/// Attributes shared by every positional element kind.
///
/// `x`/`y` is the element anchor in canvas coordinates. For path
/// elements it acts as a translation offset applied on top of the
/// recorded points; for boxed kinds it is the top-left corner.
/// z-order is not stored here: an element's position in the page
/// array is its z-index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementCommon {
    pub id: u64,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Rotation in degrees around the element center.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "one")]
    pub scale_x: f32,
    #[serde(default = "one")]
    pub scale_y: f32,
    /// Locked elements render but are excluded from hit-testing,
    /// selection, and every mutating operation.
    #[serde(default)]
    pub locked: bool,
}

fn one() -> f32 {
    1.0
}

impl ElementCommon {
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            locked: false,
        }
    }

    pub fn position(&self) -> Pos2 {
        pos2(self.x, self.y)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Axis-aligned bounds of a flat `[x0, y0, x1, y1, ..]` point list,
/// offset by the element anchor and padded.
pub fn flat_points_bounds(points: &[f32], offset: Vec2, padding: f32) -> Rect {
    let mut pairs = points.chunks_exact(2);
    let Some(first) = pairs.next() else {
        return Rect::NOTHING;
    };

    let mut min_x = first[0];
    let mut min_y = first[1];
    let mut max_x = first[0];
    let mut max_y = first[1];
    for pair in pairs {
        min_x = min_x.min(pair[0]);
        min_y = min_y.min(pair[1]);
        max_x = max_x.max(pair[0]);
        max_y = max_y.max(pair[1]);
    }

    Rect::from_min_max(
        pos2(min_x - padding + offset.x, min_y - padding + offset.y),
        pos2(max_x + padding + offset.x, max_y + padding + offset.y),
    )
}

/// Centroid (point average) of a flat point list, offset by the anchor.
pub fn flat_points_centroid(points: &[f32], offset: Vec2) -> Option<Pos2> {
    let count = points.len() / 2;
    if count == 0 {
        return None;
    }
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for pair in points.chunks_exact(2) {
        sum_x += pair[0];
        sum_y += pair[1];
    }
    Some(pos2(
        sum_x / count as f32 + offset.x,
        sum_y / count as f32 + offset.y,
    ))
}

/// Distance from `pos` to the segment `a`..`b`.
pub fn distance_to_line_segment(pos: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return pos.distance(a);
    }
    let t = ((pos - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    pos.distance(a + ab * t)
}

/// Clamp a rect so neither dimension drops below [`MIN_ELEMENT_SIZE`].
pub fn sanitize_rect(rect: Rect) -> Rect {
    let width = rect.width().max(MIN_ELEMENT_SIZE);
    let height = rect.height().max(MIN_ELEMENT_SIZE);
    Rect::from_min_size(rect.min, Vec2::new(width, height))
}
