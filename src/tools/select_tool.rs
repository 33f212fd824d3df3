use egui::{Pos2, Vec2};
use log::debug;

use super::{Tool, ToolContext, ToolKind};
use crate::element::Element;
use crate::hit_testing;

/// Click selection and drag-move.
///
/// Pointer-down on empty canvas clears the selection; on an element
/// it becomes the single selection. Dragging moves every selected
/// element optimistically: one history snapshot at the first actual
/// move, no intermediate snapshots while the drag streams.
#[derive(Debug, Default)]
pub struct SelectTool {
    drag: Option<DragState>,
}

#[derive(Debug)]
struct DragState {
    last: Pos2,
    /// Net displacement so far, undone in-place if the drag is
    /// cancelled by a gesture takeover.
    total: Vec2,
    history_saved: bool,
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        match hit_testing::pick_topmost(ctx.page, pos) {
            Some(id) => {
                if !ctx.selection.contains(id) {
                    ctx.selection.set_single(id);
                    ctx.selection.recompute(ctx.page);
                    ctx.selection_changed();
                }
                self.drag = Some(DragState {
                    last: pos,
                    total: Vec2::ZERO,
                    history_saved: false,
                });
            }
            None => {
                if !ctx.selection.is_empty() {
                    ctx.selection.clear();
                    ctx.selection_changed();
                }
                self.drag = None;
            }
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        let delta = pos - drag.last;
        if delta == Vec2::ZERO || ctx.selection.is_empty() {
            return;
        }
        if !drag.history_saved {
            ctx.history.save(ctx.page);
            drag.history_saved = true;
        }
        drag.last = pos;
        drag.total += delta;
        for id in ctx.selection.ids().to_vec() {
            if let Some(element) = ctx.page.find_element_mut(id) {
                element.translate(delta);
            }
        }
        ctx.selection.recompute(ctx.page);
        ctx.modified();
    }

    fn on_pointer_up(&mut self, _pos: Pos2, ctx: &mut ToolContext<'_>) {
        if let Some(drag) = self.drag.take() {
            if drag.total != Vec2::ZERO {
                debug!("drag finished, moved {:?}", drag.total);
                ctx.modified();
            }
        }
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if drag.total == Vec2::ZERO {
            return;
        }
        // Walk the elements back to where the drag found them.
        for id in ctx.selection.ids().to_vec() {
            if let Some(element) = ctx.page.find_element_mut(id) {
                element.translate(-drag.total);
            }
        }
        ctx.selection.recompute(ctx.page);
        ctx.modified();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ShapeKind, factory};
    use crate::history::History;
    use crate::page::Page;
    use crate::selection::Selection;
    use crate::tools::{ToolEffect, ToolSettings};
    use egui::{Rect, pos2};

    fn page_with_shape() -> Page {
        let mut page = Page::new(800.0, 600.0);
        let id = page.allocate_id();
        let mut shape = factory::create_shape(id, ShapeKind::Rectangle, pos2(10.0, 10.0));
        shape.set_bounds(Rect::from_min_size(pos2(10.0, 10.0), Vec2::new(40.0, 40.0)));
        page.add_element(shape);
        page
    }

    struct Harness {
        page: Page,
        history: History,
        selection: Selection,
        settings: ToolSettings,
        effects: Vec<ToolEffect>,
        tool: SelectTool,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                page: page_with_shape(),
                history: History::new(),
                selection: Selection::default(),
                settings: ToolSettings::default(),
                effects: Vec::new(),
                tool: SelectTool::default(),
            }
        }

        fn down(&mut self, pos: Pos2) {
            let mut ctx = ToolContext {
                page: &mut self.page,
                history: &mut self.history,
                selection: &mut self.selection,
                settings: &self.settings,
                effects: &mut self.effects,
            };
            self.tool.on_pointer_down(pos, &mut ctx);
        }

        fn mv(&mut self, pos: Pos2) {
            let mut ctx = ToolContext {
                page: &mut self.page,
                history: &mut self.history,
                selection: &mut self.selection,
                settings: &self.settings,
                effects: &mut self.effects,
            };
            self.tool.on_pointer_move(pos, &mut ctx);
        }

        fn up(&mut self, pos: Pos2) {
            let mut ctx = ToolContext {
                page: &mut self.page,
                history: &mut self.history,
                selection: &mut self.selection,
                settings: &self.settings,
                effects: &mut self.effects,
            };
            self.tool.on_pointer_up(pos, &mut ctx);
        }

        fn cancel(&mut self) {
            let mut ctx = ToolContext {
                page: &mut self.page,
                history: &mut self.history,
                selection: &mut self.selection,
                settings: &self.settings,
                effects: &mut self.effects,
            };
            self.tool.cancel(&mut ctx);
        }
    }

    #[test]
    fn click_selects_and_background_clears() {
        let mut h = Harness::new();
        h.down(pos2(20.0, 20.0));
        assert!(h.selection.contains(1));
        h.up(pos2(20.0, 20.0));

        h.down(pos2(500.0, 500.0));
        assert!(h.selection.is_empty());
    }

    #[test]
    fn drag_moves_selected_element_once_in_history() {
        let mut h = Harness::new();
        h.down(pos2(20.0, 20.0));
        h.mv(pos2(30.0, 25.0));
        h.mv(pos2(40.0, 30.0));
        h.up(pos2(40.0, 30.0));

        let bounds = h.page.find_element(1).unwrap().bounds();
        assert_eq!(bounds.min, pos2(30.0, 20.0));

        h.history.undo(&mut h.page);
        let bounds = h.page.find_element(1).unwrap().bounds();
        assert_eq!(bounds.min, pos2(10.0, 10.0));
        assert!(!h.history.can_undo());
    }

    #[test]
    fn cancelled_drag_restores_positions() {
        let mut h = Harness::new();
        h.down(pos2(20.0, 20.0));
        h.mv(pos2(60.0, 20.0));
        h.cancel();

        let bounds = h.page.find_element(1).unwrap().bounds();
        assert_eq!(bounds.min, pos2(10.0, 10.0));
    }
}
