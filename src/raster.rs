//! CPU rasterization of page content for the capture pipelines and
//! the ink-conversion flows. Deliberately simple stamping: OCR and
//! thumbnail consumers need legible pixels, not antialiased output.

use egui::{Color32, Pos2, Rect};

use crate::capture::PageRasterizer;
use crate::element::{DrawOrigin, Element, PathElement, PlannerElement};
use crate::page::Page;
use crate::services::InkBitmap;

pub struct SoftwareRasterizer;

impl PageRasterizer for SoftwareRasterizer {
    fn rasterize(&self, page: &Page, scale: f32, ink_only: bool) -> InkBitmap {
        let width = ((page.width * scale).ceil() as u32).max(1);
        let height = ((page.height * scale).ceil() as u32).max(1);
        let mut canvas = Canvas::new(width, height, Color32::WHITE);

        for element in page.elements() {
            match element {
                PlannerElement::Path(path) => {
                    if path.origin == DrawOrigin::Eraser {
                        canvas.stamp_path(path, scale, Color32::WHITE);
                    } else {
                        canvas.stamp_path(path, scale, path.color);
                    }
                }
                _ if ink_only => {}
                PlannerElement::Background(_) | PlannerElement::OcrMetadata(_) => {}
                other => {
                    let bounds = other.bounds();
                    if bounds != Rect::NOTHING {
                        canvas.outline_rect(bounds, scale, Color32::DARK_GRAY);
                    }
                }
            }
        }
        canvas.into_bitmap()
    }

    fn rasterize_elements(&self, page: &Page, ids: &[u64]) -> InkBitmap {
        // Isolated ink render: only the named paths, tight bounds.
        let mut union: Option<Rect> = None;
        for &id in ids {
            if let Some(rect) = page.find_element(id).map(|e| e.bounds()) {
                if rect != Rect::NOTHING {
                    union = Some(union.map_or(rect, |u| u.union(rect)));
                }
            }
        }
        let Some(region) = union else {
            return InkBitmap::blank(1, 1);
        };

        let width = (region.width().ceil() as u32).max(1);
        let height = (region.height().ceil() as u32).max(1);
        let mut canvas = Canvas::new(width, height, Color32::WHITE);
        canvas.origin = region.min;

        for &id in ids {
            if let Some(path) = page.find_element(id).and_then(|e| e.as_path()) {
                canvas.stamp_path(path, 1.0, path.color);
            }
        }
        canvas.into_bitmap()
    }
}

struct Canvas {
    width: u32,
    height: u32,
    origin: Pos2,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, fill: Color32) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[fill.r(), fill.g(), fill.b(), fill.a()]);
        }
        Self {
            width,
            height,
            origin: Pos2::ZERO,
            pixels,
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Color32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let index = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[index] = color.r();
        self.pixels[index + 1] = color.g();
        self.pixels[index + 2] = color.b();
        self.pixels[index + 3] = color.a();
    }

    /// Filled disc, the brush footprint.
    fn stamp(&mut self, center: Pos2, radius: f32, color: Color32) {
        let r = radius.max(0.5);
        let r_sq = r * r;
        let min_x = (center.x - r).floor() as i64;
        let max_x = (center.x + r).ceil() as i64;
        let min_y = (center.y - r).floor() as i64;
        let max_y = (center.y + r).ceil() as i64;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r_sq {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn stamp_path(&mut self, path: &PathElement, scale: f32, color: Color32) {
        let radius = (path.width * scale / 2.0).max(0.5);
        let origin = self.origin;
        let to_local =
            move |p: Pos2| Pos2::new((p.x - origin.x) * scale, (p.y - origin.y) * scale);

        let count = path.point_count();
        if count == 0 {
            return;
        }
        if count == 1 {
            self.stamp(to_local(path.point(0)), radius, color);
            return;
        }
        for i in 0..count - 1 {
            let a = to_local(path.point(i));
            let b = to_local(path.point(i + 1));
            let length = a.distance(b);
            let steps = (length / radius.max(0.75)).ceil() as u32 + 1;
            for step in 0..=steps {
                let t = step as f32 / steps as f32;
                self.stamp(a + (b - a) * t, radius, color);
            }
        }
    }

    fn outline_rect(&mut self, rect: Rect, scale: f32, color: Color32) {
        let min_x = ((rect.min.x - self.origin.x) * scale) as i64;
        let min_y = ((rect.min.y - self.origin.y) * scale) as i64;
        let max_x = ((rect.max.x - self.origin.x) * scale) as i64;
        let max_y = ((rect.max.y - self.origin.y) * scale) as i64;
        for x in min_x..=max_x {
            self.put(x, min_y, color);
            self.put(x, max_y, color);
        }
        for y in min_y..=max_y {
            self.put(min_x, y, color);
            self.put(max_x, y, color);
        }
    }

    fn into_bitmap(self) -> InkBitmap {
        InkBitmap {
            width: self.width,
            height: self.height,
            pixels: self.pixels,
        }
    }
}
