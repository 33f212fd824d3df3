use egui::Pos2;
use log::debug;

use super::{Tool, ToolContext, ToolKind};
use crate::element::{DrawOrigin, PlannerElement, factory};

/// Freehand ink: pen and highlighter. One history snapshot per
/// stroke, taken at stroke start; every subsequent move appends a
/// point to the same in-progress path element.
#[derive(Debug)]
pub struct DrawTool {
    kind: ToolKind,
    origin: DrawOrigin,
    active_path: Option<u64>,
}

impl DrawTool {
    pub fn pen() -> Self {
        Self {
            kind: ToolKind::Pen,
            origin: DrawOrigin::Pen,
            active_path: None,
        }
    }

    pub fn highlighter() -> Self {
        Self {
            kind: ToolKind::Highlighter,
            origin: DrawOrigin::Highlighter,
            active_path: None,
        }
    }

    /// Pixel-mode erasing reuses the stroke mechanics with an eraser
    /// origin; the renderer composites those paths as erase paint.
    pub(super) fn pixel_eraser() -> Self {
        Self {
            kind: ToolKind::Eraser,
            origin: DrawOrigin::Eraser,
            active_path: None,
        }
    }
}

impl Tool for DrawTool {
    fn kind(&self) -> ToolKind {
        self.kind
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        ctx.history.save(ctx.page);

        let (color, width) = match self.origin {
            DrawOrigin::Pen => (ctx.settings.stroke_color, ctx.settings.stroke_width),
            DrawOrigin::Highlighter => {
                (ctx.settings.highlighter_color, ctx.settings.highlighter_width)
            }
            DrawOrigin::Eraser => (egui::Color32::TRANSPARENT, ctx.settings.eraser_size),
        };

        let id = ctx.page.allocate_id();
        let mut element = factory::create_path(id, pos, color, width, ctx.settings.brush);
        if let PlannerElement::Path(path) = &mut element {
            path.origin = self.origin;
            if self.origin == DrawOrigin::Highlighter {
                path.opacity = 0.5;
            }
        }
        ctx.page.add_element(element);
        self.active_path = Some(id);
        ctx.modified();
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let Some(id) = self.active_path else {
            return;
        };
        if let Some(path) = ctx.page.find_element_mut(id).and_then(|e| e.as_path_mut()) {
            path.push_point(pos);
            ctx.modified();
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let Some(id) = self.active_path.take() else {
            return;
        };
        if let Some(path) = ctx.page.find_element_mut(id).and_then(|e| e.as_path_mut()) {
            if path.point_count() == 1 {
                // A tap still leaves a visible dot.
                path.push_point(pos);
            }
            debug!("stroke {id} finished with {} points", path.point_count());
        }
        ctx.modified();
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(id) = self.active_path.take() {
            ctx.page.remove_element(id);
            ctx.modified();
        }
    }
}
