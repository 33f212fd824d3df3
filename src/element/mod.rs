use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

mod background;
mod common;
mod link;
mod media;
mod path;
mod shape;
mod text;

pub use background::{BackgroundElement, BackgroundFill};
pub use common::{ElementCommon, MIN_ELEMENT_SIZE, PATH_BASE_PADDING};
pub use link::{LinkElement, LinkTarget, OcrMetadataElement};
pub use media::{MediaElement, VOICE_BADGE_SIZE, VoiceElement};
pub use path::{BrushKind, DrawOrigin, PathElement};
pub use shape::{ShapeElement, ShapeKind};
pub use text::{FontStyle, TextAlign, TextElement};

/// Discriminant for [`PlannerElement`], matching the serialized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Path,
    Shape,
    Text,
    Image,
    Sticker,
    Voice,
    Background,
    Link,
    OcrMetadata,
}

/// Common interface over every element kind.
pub trait Element {
    /// Unique (per page) identifier, immutable once created.
    fn id(&self) -> u64;

    /// The element kind tag.
    fn kind(&self) -> ElementKind;

    /// Bounding rectangle in canvas coordinates. Non-positional kinds
    /// (background, OCR metadata) report [`Rect::NOTHING`].
    fn bounds(&self) -> Rect;

    fn is_locked(&self) -> bool;

    /// Move the element. No-op on locked elements.
    fn translate(&mut self, delta: Vec2);

    /// Resize/reposition to `rect`. No-op on locked elements and on
    /// kinds without a meaningful box.
    fn set_bounds(&mut self, rect: Rect);
}

/// Everything drawable on a page, as a closed tagged union. The serde
/// representation (`kind` tag plus flattened fields) is the JSON
/// contract external collaborators consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannerElement {
    Path(PathElement),
    Shape(ShapeElement),
    Text(TextElement),
    Image(MediaElement),
    Sticker(MediaElement),
    Voice(VoiceElement),
    Background(BackgroundElement),
    Link(LinkElement),
    OcrMetadata(OcrMetadataElement),
}

impl PlannerElement {
    pub fn common(&self) -> &ElementCommon {
        match self {
            Self::Path(e) => &e.common,
            Self::Shape(e) => &e.common,
            Self::Text(e) => &e.common,
            Self::Image(e) | Self::Sticker(e) => &e.common,
            Self::Voice(e) => &e.common,
            Self::Background(e) => &e.common,
            Self::Link(e) => &e.common,
            Self::OcrMetadata(e) => &e.common,
        }
    }

    fn common_mut(&mut self) -> &mut ElementCommon {
        match self {
            Self::Path(e) => &mut e.common,
            Self::Shape(e) => &mut e.common,
            Self::Text(e) => &mut e.common,
            Self::Image(e) | Self::Sticker(e) => &mut e.common,
            Self::Voice(e) => &mut e.common,
            Self::Background(e) => &mut e.common,
            Self::Link(e) => &mut e.common,
            Self::OcrMetadata(e) => &mut e.common,
        }
    }

    /// Center of the element's bounds; for hit purposes paths use
    /// their centroid instead (see the hit-testing module).
    pub fn center(&self) -> Pos2 {
        self.bounds().center()
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.common_mut().locked = locked;
    }

    /// True for kinds the user can select: everything but the page
    /// background and OCR metadata, and never a locked element.
    pub fn is_selectable(&self) -> bool {
        !self.is_locked()
            && !matches!(self, Self::Background(_) | Self::OcrMetadata(_))
    }

    pub fn is_path(&self) -> bool {
        matches!(self, Self::Path(_))
    }

    pub fn as_path(&self) -> Option<&PathElement> {
        match self {
            Self::Path(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut PathElement> {
        match self {
            Self::Path(e) if !e.common.locked => Some(e),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Self::Text(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextElement> {
        match self {
            Self::Text(e) if !e.common.locked => Some(e),
            _ => None,
        }
    }

    /// Fold any accumulated proportional scale back into explicit
    /// width/height and reset scale to 1, keeping the stored model
    /// resolution-independent after a transform gesture ends.
    pub fn normalize_scale(&mut self) {
        if self.is_locked() {
            return;
        }
        let (sx, sy) = {
            let c = self.common();
            (c.scale_x, c.scale_y)
        };
        if sx == 1.0 && sy == 1.0 {
            return;
        }
        let old = self.bounds();
        if old != Rect::NOTHING {
            let scaled = Rect::from_center_size(
                old.center(),
                Vec2::new(old.width() * sx, old.height() * sy),
            );
            self.set_bounds(scaled);
        }
        let c = self.common_mut();
        c.scale_x = 1.0;
        c.scale_y = 1.0;
    }
}

impl Element for PlannerElement {
    fn id(&self) -> u64 {
        self.common().id
    }

    fn kind(&self) -> ElementKind {
        match self {
            Self::Path(_) => ElementKind::Path,
            Self::Shape(_) => ElementKind::Shape,
            Self::Text(_) => ElementKind::Text,
            Self::Image(_) => ElementKind::Image,
            Self::Sticker(_) => ElementKind::Sticker,
            Self::Voice(_) => ElementKind::Voice,
            Self::Background(_) => ElementKind::Background,
            Self::Link(_) => ElementKind::Link,
            Self::OcrMetadata(_) => ElementKind::OcrMetadata,
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            Self::Path(e) => e.bounds(),
            Self::Shape(e) => e.bounds(),
            Self::Text(e) => e.bounds(),
            Self::Image(e) | Self::Sticker(e) => e.bounds(),
            Self::Voice(e) => e.bounds(),
            Self::Link(e) => e.bounds(),
            Self::Background(_) | Self::OcrMetadata(_) => Rect::NOTHING,
        }
    }

    fn is_locked(&self) -> bool {
        self.common().locked
    }

    fn translate(&mut self, delta: Vec2) {
        if self.is_locked() {
            return;
        }
        match self {
            Self::Background(_) | Self::OcrMetadata(_) => {}
            _ => self.common_mut().translate(delta),
        }
    }

    fn set_bounds(&mut self, rect: Rect) {
        if self.is_locked() {
            return;
        }
        match self {
            Self::Path(e) => e.fit_to_rect(rect),
            Self::Shape(e) => e.set_bounds(rect),
            Self::Text(e) => e.set_bounds(rect),
            Self::Image(e) | Self::Sticker(e) => e.set_bounds(rect),
            Self::Voice(e) => {
                e.common.x = rect.min.x;
                e.common.y = rect.min.y;
            }
            Self::Link(e) => e.set_bounds(rect),
            Self::Background(_) | Self::OcrMetadata(_) => {}
        }
    }
}

/// Factory functions for creating elements.
pub mod factory {
    use super::*;
    use egui::Color32;

    pub fn create_path(
        id: u64,
        start: Pos2,
        color: Color32,
        width: f32,
        brush: BrushKind,
    ) -> PlannerElement {
        PlannerElement::Path(PathElement::new(id, start, color, width, brush))
    }

    pub fn create_shape(id: u64, shape: ShapeKind, origin: Pos2) -> PlannerElement {
        PlannerElement::Shape(ShapeElement::new(id, shape, origin))
    }

    pub fn create_text(id: u64, position: Pos2) -> PlannerElement {
        PlannerElement::Text(TextElement::new(id, position))
    }

    pub fn create_image(id: u64, src: String, rect: Rect) -> PlannerElement {
        PlannerElement::Image(MediaElement::new(id, src, rect))
    }

    pub fn create_sticker(id: u64, src: String, rect: Rect) -> PlannerElement {
        PlannerElement::Sticker(MediaElement::new(id, src, rect))
    }

    pub fn create_voice(id: u64, src: String, duration_secs: f32, anchor: Pos2) -> PlannerElement {
        PlannerElement::Voice(VoiceElement::new(id, src, duration_secs, anchor))
    }

    pub fn create_background(id: u64, color: Color32) -> PlannerElement {
        PlannerElement::Background(BackgroundElement::solid(id, color))
    }

    pub fn create_link(id: u64, rect: Rect, target: LinkTarget) -> PlannerElement {
        PlannerElement::Link(LinkElement::new(id, rect, target))
    }

    pub fn create_ocr_metadata(id: u64, text: String) -> PlannerElement {
        PlannerElement::OcrMetadata(OcrMetadataElement::new(id, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    #[test]
    fn locked_element_ignores_mutation() {
        let mut shape = factory::create_shape(1, ShapeKind::Rectangle, pos2(10.0, 10.0));
        shape.set_bounds(Rect::from_min_size(pos2(10.0, 10.0), Vec2::new(50.0, 50.0)));
        shape.set_locked(true);

        let before = shape.bounds();
        shape.translate(Vec2::new(100.0, 0.0));
        shape.set_bounds(Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(5.0, 5.0)));
        assert_eq!(shape.bounds(), before);
    }

    #[test]
    fn normalize_scale_folds_into_dimensions() {
        let mut shape = factory::create_shape(2, ShapeKind::Rectangle, pos2(0.0, 0.0));
        shape.set_bounds(Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(40.0, 20.0)));
        if let PlannerElement::Shape(s) = &mut shape {
            s.common.scale_x = 2.0;
            s.common.scale_y = 0.5;
        }
        shape.normalize_scale();

        let bounds = shape.bounds();
        assert!((bounds.width() - 80.0).abs() < 0.001);
        assert!((bounds.height() - 10.0).abs() < 0.001);
        assert_eq!(shape.common().scale_x, 1.0);
        assert_eq!(shape.common().scale_y, 1.0);
    }

    #[test]
    fn serde_round_trip_keeps_kind_tag() {
        let path = factory::create_path(3, pos2(1.0, 2.0), Color32::RED, 2.0, BrushKind::Pen);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json["kind"], "path");
        let back: PlannerElement = serde_json::from_value(json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn background_is_never_selectable() {
        let bg = factory::create_background(4, Color32::WHITE);
        assert!(!bg.is_selectable());
        assert_eq!(bg.bounds(), Rect::NOTHING);
    }
}
