use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::editor::{ART_FADE_IN_SECS, PlannerEditor};
use crate::element::{
    BackgroundFill, DrawOrigin, Element, MediaElement, PathElement, PlannerElement, ShapeElement,
    ShapeKind, TextAlign, TextElement, VOICE_BADGE_SIZE, VoiceElement,
};
use crate::viewport::Viewport;

/// Radius of the selection handles drawn at the bounds corners.
const HANDLE_RADIUS: f32 = 5.0;
const SELECTION_COLOR: Color32 = Color32::from_rgb(0x3d, 0x7e, 0xff);

/// Immediate-mode element renderer.
///
/// The background element is drawn first regardless of its array
/// position (it logically sits at z-index -1); everything else draws
/// in array order. Eraser-origin paths composite as erase paint by
/// drawing in the page fill color over the ink beneath them.
pub struct Renderer {
    page_fill: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            page_fill: Color32::WHITE,
        }
    }
}

impl Renderer {
    pub fn render(&mut self, painter: &Painter, editor: &PlannerEditor) {
        let viewport = &editor.viewport;
        let page = editor.active_page();
        let clock = editor.clock_secs();

        self.page_fill = Color32::WHITE;
        if let Some(PlannerElement::Background(bg)) = page.background() {
            if let BackgroundFill::Solid { color } = bg.fill {
                self.page_fill = color;
            }
        }
        self.draw_page_fill(painter, viewport, page.width, page.height);

        for element in page.elements() {
            match element {
                PlannerElement::Path(path) => self.draw_path(painter, viewport, path),
                PlannerElement::Shape(shape) => self.draw_shape(painter, viewport, shape),
                PlannerElement::Text(text) => self.draw_text(painter, viewport, text),
                PlannerElement::Image(media) | PlannerElement::Sticker(media) => {
                    self.draw_media(painter, viewport, media, clock)
                }
                PlannerElement::Voice(voice) => self.draw_voice(painter, viewport, voice),
                PlannerElement::Link(link) => {
                    self.draw_frame(painter, viewport, link.bounds(), Color32::LIGHT_BLUE)
                }
                PlannerElement::Background(_) | PlannerElement::OcrMetadata(_) => {}
            }
        }

        self.draw_overlays(painter, editor);
    }

    fn draw_page_fill(&self, painter: &Painter, viewport: &Viewport, width: f32, height: f32) {
        let rect = transform_rect(
            viewport,
            Rect::from_min_size(Pos2::ZERO, Vec2::new(width, height)),
        );
        painter.rect_filled(rect, 0.0, self.page_fill);
    }

    fn draw_path(&self, painter: &Painter, viewport: &Viewport, path: &PathElement) {
        if path.point_count() < 2 {
            return;
        }
        let points: Vec<Pos2> = path
            .iter_points()
            .map(|p| viewport.canvas_to_screen(p))
            .collect();
        let color = match path.origin {
            // Erase paint: page fill over whatever ink lies below.
            DrawOrigin::Eraser => self.page_fill,
            _ => with_opacity(path.color, path.opacity),
        };
        painter.add(Shape::line(
            points,
            Stroke::new(path.width * viewport.zoom(), color),
        ));
    }

    fn draw_shape(&self, painter: &Painter, viewport: &Viewport, shape: &ShapeElement) {
        let rect = transform_rect(viewport, shape.bounds());
        let stroke = Stroke::new(shape.stroke_width * viewport.zoom(), shape.stroke_color);
        let fill = if shape.filled {
            shape.fill_color
        } else {
            Color32::TRANSPARENT
        };

        match shape.shape {
            ShapeKind::Rectangle => {
                painter.rect(rect, 0.0, fill, stroke);
            }
            ShapeKind::Circle => {
                painter.add(Shape::ellipse_filled(
                    rect.center(),
                    rect.size() / 2.0,
                    fill,
                ));
                painter.add(Shape::ellipse_stroke(
                    rect.center(),
                    rect.size() / 2.0,
                    stroke,
                ));
            }
            ShapeKind::Line => {
                painter.line_segment([rect.left_top(), rect.right_bottom()], stroke);
            }
            ShapeKind::Arrow => {
                let dir = rect.right_bottom() - rect.left_top();
                painter.arrow(rect.left_top(), dir, stroke);
            }
            _ => {
                let points = polygon_points(shape.shape, rect);
                if shape.filled {
                    painter.add(Shape::convex_polygon(points.clone(), fill, stroke));
                } else {
                    painter.add(Shape::closed_line(points, stroke));
                }
            }
        }
    }

    fn draw_text(&self, painter: &Painter, viewport: &Viewport, text: &TextElement) {
        let rect = transform_rect(viewport, text.bounds());
        if let Some(background) = text.background {
            painter.rect_filled(rect, 2.0, background);
        }
        if let Some(border) = text.border {
            painter.rect_stroke(rect, 2.0, Stroke::new(1.0, border));
        }
        let anchor = match text.align {
            TextAlign::Left => (rect.left_top(), Align2::LEFT_TOP),
            TextAlign::Center => (rect.center_top(), Align2::CENTER_TOP),
            TextAlign::Right => (rect.right_top(), Align2::RIGHT_TOP),
        };
        painter.text(
            anchor.0,
            anchor.1,
            &text.content,
            FontId::proportional(text.font_size * viewport.zoom()),
            Color32::BLACK,
        );
    }

    fn draw_media(&self, painter: &Painter, viewport: &Viewport, media: &MediaElement, clock: f64) {
        let rect = transform_rect(viewport, media.bounds());
        // Bitmap upload lives in the shell's texture cache; the core
        // renderer draws the frame, honoring the fade-in ramp for
        // freshly generated artwork.
        let alpha = media
            .inserted_at
            .map(|at| (((clock - at) / ART_FADE_IN_SECS).clamp(0.0, 1.0) * 255.0) as u8)
            .unwrap_or(255);
        let tint = Color32::from_rgba_unmultiplied(220, 220, 220, alpha);
        painter.rect_filled(rect, 4.0, tint);
        painter.rect_stroke(
            rect,
            4.0,
            Stroke::new(1.0, Color32::GRAY.gamma_multiply(alpha as f32 / 255.0)),
        );
    }

    fn draw_voice(&self, painter: &Painter, viewport: &Viewport, voice: &VoiceElement) {
        let center = viewport.canvas_to_screen(voice.bounds().center());
        let radius = VOICE_BADGE_SIZE / 2.0 * viewport.zoom();
        painter.circle_filled(center, radius, Color32::from_rgb(0x6a, 0x4c, 0xff));
        painter.text(
            center,
            Align2::CENTER_CENTER,
            format!("{:.0}s", voice.duration_secs),
            FontId::proportional(10.0 * viewport.zoom()),
            Color32::WHITE,
        );
    }

    fn draw_frame(&self, painter: &Painter, viewport: &Viewport, bounds: Rect, color: Color32) {
        let rect = transform_rect(viewport, bounds);
        painter.rect_stroke(rect, 2.0, Stroke::new(1.0, color));
    }

    /// Selection bounds + handles, the live lasso polyline, and the
    /// link rubber-band.
    fn draw_overlays(&self, painter: &Painter, editor: &PlannerEditor) {
        let viewport = &editor.viewport;

        if let Some(bounds) = editor.selection().bounds() {
            let rect = transform_rect(viewport, bounds);
            painter.rect_stroke(rect, 0.0, Stroke::new(1.5, SELECTION_COLOR));
            for corner in [
                rect.left_top(),
                rect.right_top(),
                rect.left_bottom(),
                rect.right_bottom(),
            ] {
                painter.circle_filled(corner, HANDLE_RADIUS, SELECTION_COLOR);
            }
        }

        if let Some(points) = editor.tool().lasso_preview() {
            let screen: Vec<Pos2> = points.iter().map(|&p| viewport.canvas_to_screen(p)).collect();
            painter.add(Shape::line(
                screen,
                Stroke::new(1.0, SELECTION_COLOR.gamma_multiply(0.8)),
            ));
        }

        if let Some(rect) = editor.tool().link_preview() {
            self.draw_frame(painter, viewport, rect, SELECTION_COLOR);
        }
    }
}

fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    if opacity >= 1.0 {
        color
    } else {
        color.gamma_multiply(opacity)
    }
}

fn transform_rect(viewport: &Viewport, rect: Rect) -> Rect {
    Rect::from_two_pos(
        viewport.canvas_to_screen(rect.min),
        viewport.canvas_to_screen(rect.max),
    )
}

fn polygon_points(kind: ShapeKind, rect: Rect) -> Vec<Pos2> {
    let center = rect.center();
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    let ring = |count: u32, phase: f32| -> Vec<Pos2> {
        (0..count)
            .map(|i| {
                let angle = phase + i as f32 * std::f32::consts::TAU / count as f32;
                Pos2::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
            })
            .collect()
    };
    match kind {
        ShapeKind::Triangle => ring(3, -std::f32::consts::FRAC_PI_2),
        ShapeKind::Diamond => ring(4, -std::f32::consts::FRAC_PI_2),
        ShapeKind::Polygon { sides } => ring(sides.max(3), -std::f32::consts::FRAC_PI_2),
        ShapeKind::Star => {
            let outer = ring(5, -std::f32::consts::FRAC_PI_2);
            let inner = ring(5, -std::f32::consts::FRAC_PI_2 + std::f32::consts::TAU / 10.0);
            outer
                .into_iter()
                .zip(inner)
                .flat_map(|(o, i)| {
                    let pulled = center + (i - center) * 0.5;
                    [o, pulled]
                })
                .collect()
        }
        _ => vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()],
    }
}
