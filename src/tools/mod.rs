use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::element::{BrushKind, ShapeKind};
use crate::history::History;
use crate::page::Page;
use crate::selection::Selection;

mod draw_tool;
mod eraser_tool;
mod lasso_tool;
mod link_tool;
mod place_tool;
mod select_tool;
mod shape_tool;
mod text_tool;

pub use draw_tool::DrawTool;
pub use eraser_tool::{EraserMode, EraserTool};
pub use lasso_tool::LassoTool;
pub use link_tool::LinkTool;
pub use place_tool::PlaceTool;
pub use select_tool::SelectTool;
pub use shape_tool::ShapeTool;
pub use text_tool::TextTool;

/// Every tool the toolbar can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Select,
    Pen,
    Highlighter,
    Eraser,
    Text,
    Shape,
    Link,
    Lasso,
    Sticker,
    Image,
    Background,
}

/// Brush/shape/eraser configuration shared by all tools; owned by the
/// editor and persisted with the shell state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    pub stroke_color: Color32,
    pub stroke_width: f32,
    pub brush: BrushKind,
    pub highlighter_color: Color32,
    pub highlighter_width: f32,
    pub eraser_mode: EraserMode,
    pub eraser_size: f32,
    pub shape: ShapeKind,
    pub shape_filled: bool,
    pub fill_color: Color32,
    pub background_color: Color32,
    /// Source reference used by the sticker/image placement tools.
    pub media_src: String,
    pub media_size: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            stroke_color: Color32::BLACK,
            stroke_width: 2.5,
            brush: BrushKind::Pen,
            highlighter_color: Color32::from_rgba_unmultiplied(255, 235, 59, 120),
            highlighter_width: 14.0,
            eraser_mode: EraserMode::Stroke,
            eraser_size: 24.0,
            shape: ShapeKind::Rectangle,
            shape_filled: false,
            fill_color: Color32::TRANSPARENT,
            background_color: Color32::WHITE,
            media_src: String::new(),
            media_size: 96.0,
        }
    }
}

/// Outward requests a tool raises during dispatch; the editor drains
/// these after every pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEffect {
    /// The element list changed (history/capture/persist bookkeeping).
    PageModified,
    /// The selection set changed.
    SelectionChanged,
    /// A finished link rectangle needs the external target chooser.
    RequestLinkTarget(Rect),
    /// A text element entered edit mode.
    BeginTextEdit(u64),
}

/// Everything a tool may touch while handling a pointer event.
pub struct ToolContext<'a> {
    pub page: &'a mut Page,
    pub history: &'a mut History,
    pub selection: &'a mut Selection,
    pub settings: &'a ToolSettings,
    pub effects: &'a mut Vec<ToolEffect>,
}

impl ToolContext<'_> {
    pub fn modified(&mut self) {
        self.effects.push(ToolEffect::PageModified);
    }

    pub fn selection_changed(&mut self) {
        self.effects.push(ToolEffect::SelectionChanged);
    }
}

/// Pointer-event interface every tool implements. Positions are in
/// canvas coordinates; the editor converts from screen space before
/// dispatch.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>);

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>);

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>);

    /// Abandon the in-progress action without committing it (a
    /// two-finger gesture or swipe claimed the input stream).
    fn cancel(&mut self, _ctx: &mut ToolContext<'_>) {}
}

/// The active tool, as a dispatch enum so the editor owns plain data
/// instead of a boxed trait object.
#[derive(Debug)]
pub enum ActiveTool {
    Select(SelectTool),
    Draw(DrawTool),
    Eraser(EraserTool),
    Text(TextTool),
    Shape(ShapeTool),
    Link(LinkTool),
    Lasso(LassoTool),
    Place(PlaceTool),
    Background,
}

impl ActiveTool {
    /// Fresh tool state for a toolbar selection.
    pub fn for_kind(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Select => Self::Select(SelectTool::default()),
            ToolKind::Pen => Self::Draw(DrawTool::pen()),
            ToolKind::Highlighter => Self::Draw(DrawTool::highlighter()),
            ToolKind::Eraser => Self::Eraser(EraserTool::default()),
            ToolKind::Text => Self::Text(TextTool::default()),
            ToolKind::Shape => Self::Shape(ShapeTool::default()),
            ToolKind::Link => Self::Link(LinkTool::default()),
            ToolKind::Lasso => Self::Lasso(LassoTool::default()),
            ToolKind::Sticker => Self::Place(PlaceTool::sticker()),
            ToolKind::Image => Self::Place(PlaceTool::image()),
            ToolKind::Background => Self::Background,
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Select(t) => t.kind(),
            Self::Draw(t) => t.kind(),
            Self::Eraser(t) => t.kind(),
            Self::Text(t) => t.kind(),
            Self::Shape(t) => t.kind(),
            Self::Link(t) => t.kind(),
            Self::Lasso(t) => t.kind(),
            Self::Place(t) => t.kind(),
            Self::Background => ToolKind::Background,
        }
    }

    pub fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        match self {
            Self::Select(t) => t.on_pointer_down(pos, ctx),
            Self::Draw(t) => t.on_pointer_down(pos, ctx),
            Self::Eraser(t) => t.on_pointer_down(pos, ctx),
            Self::Text(t) => t.on_pointer_down(pos, ctx),
            Self::Shape(t) => t.on_pointer_down(pos, ctx),
            Self::Link(t) => t.on_pointer_down(pos, ctx),
            Self::Lasso(t) => t.on_pointer_down(pos, ctx),
            Self::Place(t) => t.on_pointer_down(pos, ctx),
            Self::Background => background_tap(pos, ctx),
        }
    }

    pub fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        match self {
            Self::Select(t) => t.on_pointer_move(pos, ctx),
            Self::Draw(t) => t.on_pointer_move(pos, ctx),
            Self::Eraser(t) => t.on_pointer_move(pos, ctx),
            Self::Text(t) => t.on_pointer_move(pos, ctx),
            Self::Shape(t) => t.on_pointer_move(pos, ctx),
            Self::Link(t) => t.on_pointer_move(pos, ctx),
            Self::Lasso(t) => t.on_pointer_move(pos, ctx),
            Self::Place(t) => t.on_pointer_move(pos, ctx),
            Self::Background => {}
        }
    }

    pub fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        match self {
            Self::Select(t) => t.on_pointer_up(pos, ctx),
            Self::Draw(t) => t.on_pointer_up(pos, ctx),
            Self::Eraser(t) => t.on_pointer_up(pos, ctx),
            Self::Text(t) => t.on_pointer_up(pos, ctx),
            Self::Shape(t) => t.on_pointer_up(pos, ctx),
            Self::Link(t) => t.on_pointer_up(pos, ctx),
            Self::Lasso(t) => t.on_pointer_up(pos, ctx),
            Self::Place(t) => t.on_pointer_up(pos, ctx),
            Self::Background => {}
        }
    }

    pub fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        match self {
            Self::Select(t) => t.cancel(ctx),
            Self::Draw(t) => t.cancel(ctx),
            Self::Eraser(t) => t.cancel(ctx),
            Self::Text(t) => t.cancel(ctx),
            Self::Shape(t) => t.cancel(ctx),
            Self::Link(t) => t.cancel(ctx),
            Self::Lasso(t) => t.cancel(ctx),
            Self::Place(t) => t.cancel(ctx),
            Self::Background => {}
        }
    }

    /// The link tool's live rubber-band rect, for the overlay.
    pub fn link_preview(&self) -> Option<Rect> {
        match self {
            Self::Link(t) => t.preview_rect(),
            _ => None,
        }
    }

    /// The lasso tool's accumulated polyline, for the overlay.
    pub fn lasso_preview(&self) -> Option<&[Pos2]> {
        match self {
            Self::Lasso(t) => t.preview_points(),
            _ => None,
        }
    }
}

/// Background is a one-tap tool: replace the page fill with the
/// configured color.
fn background_tap(_pos: Pos2, ctx: &mut ToolContext<'_>) {
    use crate::element::{Element, ElementKind, factory};

    ctx.history.save(ctx.page);
    let existing: Vec<u64> = ctx
        .page
        .elements()
        .iter()
        .filter(|e| e.kind() == ElementKind::Background && !e.is_locked())
        .map(|e| e.id())
        .collect();
    for id in existing {
        ctx.page.remove_element(id);
    }
    let id = ctx.page.allocate_id();
    let background = factory::create_background(id, ctx.settings.background_color);
    ctx.page.elements_mut().insert(0, background);
    ctx.modified();
}
