use egui::Pos2;
use log::debug;

use super::{Tool, ToolContext, ToolKind};
use crate::hit_testing;

/// Freehand multi-select: accumulates a polyline while the pointer is
/// down, then closes it and replaces the selection with everything
/// the polygon contains. Selecting nothing is a silent no-op that
/// clears the selection, not an error.
#[derive(Debug, Default)]
pub struct LassoTool {
    points: Vec<Pos2>,
}

impl LassoTool {
    /// Live polyline for the overlay renderer.
    pub fn preview_points(&self) -> Option<&[Pos2]> {
        (!self.points.is_empty()).then_some(self.points.as_slice())
    }
}

impl Tool for LassoTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Lasso
    }

    fn on_pointer_down(&mut self, pos: Pos2, _ctx: &mut ToolContext<'_>) {
        self.points.clear();
        self.points.push(pos);
    }

    fn on_pointer_move(&mut self, pos: Pos2, _ctx: &mut ToolContext<'_>) {
        if !self.points.is_empty() {
            self.points.push(pos);
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        if self.points.is_empty() {
            return;
        }
        self.points.push(pos);
        if self.points.len() >= 3 {
            let selected = hit_testing::lasso_select(ctx.page, &self.points);
            debug!("lasso captured {} element(s)", selected.len());
            ctx.selection.replace(selected);
            ctx.selection.recompute(ctx.page);
            ctx.selection_changed();
        }
        self.points.clear();
    }

    fn cancel(&mut self, _ctx: &mut ToolContext<'_>) {
        self.points.clear();
    }
}
