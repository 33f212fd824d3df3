use egui::{Pos2, Vec2, pos2};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;

/// Pan/zoom/rotation state and the screen↔canvas transform.
///
/// `canvas_to_screen` composes: offset by the canvas half-dimensions
/// (so the page center is the fixed point), scale by zoom, rotate,
/// then translate to the view center plus the pan offset.
/// `screen_to_canvas` is the exact inverse. All hit-testing and
/// element mutation happen in canvas space; only input capture and
/// overlay placement use screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    zoom: f32,
    /// Pan offset in screen pixels.
    pub pan: Vec2,
    /// Rotation in degrees, wrapped to [0, 360).
    rotation: f32,
    /// Screen-space center of the view area, set by layout each frame.
    pub view_center: Pos2,
    /// Pixel dimensions of the active page.
    pub canvas_size: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            rotation: 0.0,
            view_center: pos2(0.0, 0.0),
            canvas_size: Vec2::new(768.0, 1024.0),
        }
    }
}

impl Viewport {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Multiply the current zoom by `factor`, clamped to the legal
    /// range. Returns the factor actually applied.
    pub fn zoom_by(&mut self, factor: f32) -> f32 {
        let old = self.zoom;
        self.set_zoom(old * factor);
        self.zoom / old
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn rotate_by(&mut self, degrees: f32) {
        self.rotation = (self.rotation + degrees).rem_euclid(360.0);
    }

    /// True when zoom is within ±5% of 1.0; swipe navigation is only
    /// recognized at rest zoom.
    pub fn is_at_rest_zoom(&self) -> bool {
        (self.zoom - 1.0).abs() <= 0.05
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
        self.rotation = 0.0;
    }

    pub fn canvas_to_screen(&self, canvas: Pos2) -> Pos2 {
        let half = self.canvas_size / 2.0;
        let centered = (canvas - pos2(half.x, half.y)) * self.zoom;
        let rotated = rotate(centered, self.rotation.to_radians());
        self.view_center + rotated + self.pan
    }

    pub fn screen_to_canvas(&self, screen: Pos2) -> Pos2 {
        let half = self.canvas_size / 2.0;
        let centered = screen - self.view_center - self.pan;
        let unrotated = rotate(centered, -self.rotation.to_radians());
        pos2(unrotated.x / self.zoom + half.x, unrotated.y / self.zoom + half.y)
    }
}

fn rotate(v: Vec2, radians: f32) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
