use egui::{Color32, Pos2, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

use super::common::{self, ElementCommon, PATH_BASE_PADDING};

/// Brush variant used to render an ink stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushKind {
    Pen,
    Pencil,
    Marker,
    Fountain,
    Calligraphy,
    Art,
}

/// Which drawing tool produced the stroke. Eraser-origin paths are
/// composited as erase paint over the ink layer instead of drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawOrigin {
    Pen,
    Highlighter,
    Eraser,
}

/// Ink stroke: an ordered point sequence stored as flat `x,y` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Flat `[x0, y0, x1, y1, ..]` canvas coordinates, before the
    /// anchor offset in `common` is applied.
    pub points: Vec<f32>,
    pub color: Color32,
    pub width: f32,
    pub opacity: f32,
    pub brush: BrushKind,
    pub origin: DrawOrigin,
}

impl PathElement {
    pub fn new(id: u64, start: Pos2, color: Color32, width: f32, brush: BrushKind) -> Self {
        Self {
            common: ElementCommon::new(id, 0.0, 0.0),
            points: vec![start.x, start.y],
            color,
            width,
            opacity: 1.0,
            brush,
            origin: DrawOrigin::Pen,
        }
    }

    /// Number of points in the stroke.
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    /// Point `index` with the anchor offset applied.
    pub fn point(&self, index: usize) -> Pos2 {
        pos2(
            self.points[index * 2] + self.common.x,
            self.points[index * 2 + 1] + self.common.y,
        )
    }

    /// Iterate the stroke's points in canvas space.
    pub fn iter_points(&self) -> impl Iterator<Item = Pos2> + '_ {
        let offset = Vec2::new(self.common.x, self.common.y);
        self.points
            .chunks_exact(2)
            .map(move |pair| pos2(pair[0] + offset.x, pair[1] + offset.y))
    }

    /// Append a point while the stroke is being drawn.
    pub fn push_point(&mut self, pos: Pos2) {
        self.points.push(pos.x - self.common.x);
        self.points.push(pos.y - self.common.y);
    }

    /// Point average in canvas space, `None` for empty strokes.
    pub fn centroid(&self) -> Option<Pos2> {
        common::flat_points_centroid(&self.points, Vec2::new(self.common.x, self.common.y))
    }

    pub fn bounds(&self) -> Rect {
        common::flat_points_bounds(
            &self.points,
            Vec2::new(self.common.x, self.common.y),
            PATH_BASE_PADDING + self.width / 2.0,
        )
    }

    /// True if any point lies within `radius` of `pos`.
    pub fn any_point_within(&self, pos: Pos2, radius: f32) -> bool {
        self.iter_points().any(|p| p.distance(pos) <= radius)
    }

    /// True if `pos` lies on the stroke itself (within half the
    /// stroke width of some segment).
    pub fn hit_test(&self, pos: Pos2) -> bool {
        let count = self.point_count();
        if count == 0 {
            return false;
        }
        if count == 1 {
            return self.point(0).distance(pos) <= self.width / 2.0 + PATH_BASE_PADDING;
        }
        for i in 0..count - 1 {
            let d = common::distance_to_line_segment(pos, self.point(i), self.point(i + 1));
            if d <= self.width / 2.0 + PATH_BASE_PADDING {
                return true;
            }
        }
        false
    }

    /// Rescale the recorded points into `new_rect`, keeping the
    /// anchor offset folded in.
    pub fn fit_to_rect(&mut self, new_rect: Rect) {
        let old = self.bounds();
        if old == Rect::NOTHING || old.width() == 0.0 || old.height() == 0.0 {
            return;
        }
        let new_rect = common::sanitize_rect(new_rect);
        for pair in self.points.chunks_exact_mut(2) {
            let rel_x = (pair[0] + self.common.x - old.min.x) / old.width();
            let rel_y = (pair[1] + self.common.y - old.min.y) / old.height();
            pair[0] = new_rect.min.x + rel_x * new_rect.width();
            pair[1] = new_rect.min.y + rel_y * new_rect.height();
        }
        self.common.x = 0.0;
        self.common.y = 0.0;
        let scale = (new_rect.width() / old.width() + new_rect.height() / old.height()) / 2.0;
        self.width *= scale;
    }
}
