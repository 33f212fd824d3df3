use egui::Pos2;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{DrawTool, Tool, ToolContext, ToolKind};
use crate::hit_testing;

/// The three eraser strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraserMode {
    /// Destructive erase paint over the ink layer only; appends an
    /// eraser-origin path instead of deleting anything.
    Pixel,
    /// Delete any ink path with a point within `eraser_size / 2` of
    /// the pointer.
    Stroke,
    /// Delete any non-path element whose center is within
    /// `eraser_size` of the pointer.
    Object,
}

/// Eraser over all three modes. Pixel mode delegates to the stroke
/// mechanics; the deleting modes take one history snapshot lazily,
/// just before the first element actually goes away.
#[derive(Debug)]
pub struct EraserTool {
    pixel: DrawTool,
    active: bool,
    history_saved: bool,
}

impl Default for EraserTool {
    fn default() -> Self {
        Self {
            pixel: DrawTool::pixel_eraser(),
            active: false,
            history_saved: false,
        }
    }
}

impl EraserTool {
    fn erase_at(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let hits = match ctx.settings.eraser_mode {
            EraserMode::Pixel => return,
            EraserMode::Stroke => {
                hit_testing::stroke_eraser_hits(ctx.page, pos, ctx.settings.eraser_size)
            }
            EraserMode::Object => {
                hit_testing::object_eraser_hits(ctx.page, pos, ctx.settings.eraser_size)
            }
        };
        if hits.is_empty() {
            return;
        }
        if !self.history_saved {
            ctx.history.save(ctx.page);
            self.history_saved = true;
        }
        for id in &hits {
            ctx.page.remove_element(*id);
        }
        debug!("eraser removed {} element(s)", hits.len());
        ctx.selection.recompute(ctx.page);
        ctx.modified();
    }
}

impl Tool for EraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Eraser
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        self.active = true;
        self.history_saved = false;
        if ctx.settings.eraser_mode == EraserMode::Pixel {
            self.pixel.on_pointer_down(pos, ctx);
        } else {
            self.erase_at(pos, ctx);
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        if !self.active {
            return;
        }
        if ctx.settings.eraser_mode == EraserMode::Pixel {
            self.pixel.on_pointer_move(pos, ctx);
        } else {
            self.erase_at(pos, ctx);
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        if ctx.settings.eraser_mode == EraserMode::Pixel {
            self.pixel.on_pointer_up(pos, ctx);
        }
        self.active = false;
        self.history_saved = false;
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        self.pixel.cancel(ctx);
        self.active = false;
        self.history_saved = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BrushKind, DrawOrigin, Element, ShapeKind, factory};
    use crate::history::History;
    use crate::page::Page;
    use crate::selection::Selection;
    use crate::tools::ToolSettings;
    use egui::{Color32, Rect, Vec2, pos2};

    fn settings(mode: EraserMode) -> ToolSettings {
        ToolSettings {
            eraser_mode: mode,
            eraser_size: 24.0,
            ..ToolSettings::default()
        }
    }

    fn run_tap(page: &mut Page, mode: EraserMode, pos: Pos2) {
        let mut history = History::new();
        let mut selection = Selection::default();
        let settings = settings(mode);
        let mut effects = Vec::new();
        let mut tool = EraserTool::default();
        let mut ctx = ToolContext {
            page,
            history: &mut history,
            selection: &mut selection,
            settings: &settings,
            effects: &mut effects,
        };
        tool.on_pointer_down(pos, &mut ctx);
        tool.on_pointer_up(pos, &mut ctx);
    }

    #[test]
    fn stroke_mode_deletes_whole_path_in_radius() {
        let mut page = Page::new(800.0, 600.0);
        let id = page.allocate_id();
        let mut near = factory::create_path(id, pos2(60.0, 50.0), Color32::BLACK, 2.0, BrushKind::Pen);
        near.as_path_mut().unwrap().push_point(pos2(200.0, 200.0));
        page.add_element(near);
        let id = page.allocate_id();
        page.add_element(factory::create_path(
            id,
            pos2(70.0, 50.0),
            Color32::BLACK,
            2.0,
            BrushKind::Pen,
        ));

        run_tap(&mut page, EraserMode::Stroke, pos2(50.0, 50.0));

        // Path 1 had a point within 12 units and is gone entirely;
        // path 2's nearest point is 20 units away and survives.
        assert!(page.find_element(1).is_none());
        assert!(page.find_element(2).is_some());
    }

    #[test]
    fn object_mode_ignores_paths_and_locked() {
        let mut page = Page::new(800.0, 600.0);
        let id = page.allocate_id();
        page.add_element(factory::create_path(
            id,
            pos2(50.0, 50.0),
            Color32::BLACK,
            2.0,
            BrushKind::Pen,
        ));
        let id = page.allocate_id();
        let mut shape = factory::create_shape(id, ShapeKind::Circle, pos2(45.0, 45.0));
        shape.set_bounds(Rect::from_min_size(pos2(45.0, 45.0), Vec2::new(10.0, 10.0)));
        page.add_element(shape);
        let id = page.allocate_id();
        let mut locked = factory::create_shape(id, ShapeKind::Star, pos2(48.0, 48.0));
        locked.set_bounds(Rect::from_min_size(pos2(48.0, 48.0), Vec2::new(10.0, 10.0)));
        locked.set_locked(true);
        page.add_element(locked);

        run_tap(&mut page, EraserMode::Object, pos2(50.0, 50.0));

        assert!(page.find_element(1).is_some());
        assert!(page.find_element(2).is_none());
        assert!(page.find_element(3).is_some());
    }

    #[test]
    fn pixel_mode_appends_eraser_path() {
        let mut page = Page::new(800.0, 600.0);
        run_tap(&mut page, EraserMode::Pixel, pos2(30.0, 30.0));

        assert_eq!(page.elements().len(), 1);
        let path = page.elements()[0].as_path().unwrap();
        assert_eq!(path.origin, DrawOrigin::Eraser);
    }
}
