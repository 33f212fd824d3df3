use egui::Pos2;

use super::{Tool, ToolContext, ToolKind};
use crate::element::{PlannerElement, factory};

/// Rubber-band shape placement: pointer-down drops a zero-size shape,
/// moves stretch it between the origin and the pointer, up finalizes.
#[derive(Debug, Default)]
pub struct ShapeTool {
    active: Option<ActiveShape>,
}

#[derive(Debug)]
struct ActiveShape {
    id: u64,
    origin: Pos2,
}

impl Tool for ShapeTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Shape
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        ctx.history.save(ctx.page);
        let id = ctx.page.allocate_id();
        let mut element = factory::create_shape(id, ctx.settings.shape, pos);
        if let PlannerElement::Shape(shape) = &mut element {
            shape.stroke_color = ctx.settings.stroke_color;
            shape.stroke_width = ctx.settings.stroke_width;
            shape.filled = ctx.settings.shape_filled;
            shape.fill_color = ctx.settings.fill_color;
        }
        ctx.page.add_element(element);
        self.active = Some(ActiveShape { id, origin: pos });
        ctx.modified();
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let Some(active) = &self.active else {
            return;
        };
        if let Some(PlannerElement::Shape(shape)) = ctx.page.find_element_mut(active.id) {
            shape.drag_to(active.origin, pos);
            ctx.modified();
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let Some(active) = self.active.take() else {
            return;
        };
        if let Some(PlannerElement::Shape(shape)) = ctx.page.find_element_mut(active.id) {
            shape.drag_to(active.origin, pos);
            ctx.modified();
        }
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(active) = self.active.take() {
            ctx.page.remove_element(active.id);
            ctx.modified();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::history::History;
    use crate::page::Page;
    use crate::selection::Selection;
    use crate::tools::ToolSettings;
    use egui::pos2;

    #[test]
    fn drag_sizes_shape_from_origin() {
        let mut page = Page::new(800.0, 600.0);
        let mut history = History::new();
        let mut selection = Selection::default();
        let settings = ToolSettings::default();
        let mut effects = Vec::new();
        let mut ctx = ToolContext {
            page: &mut page,
            history: &mut history,
            selection: &mut selection,
            settings: &settings,
            effects: &mut effects,
        };

        let mut tool = ShapeTool::default();
        tool.on_pointer_down(pos2(50.0, 50.0), &mut ctx);
        tool.on_pointer_move(pos2(90.0, 80.0), &mut ctx);
        tool.on_pointer_up(pos2(100.0, 90.0), &mut ctx);

        let bounds = page.elements()[0].bounds();
        assert_eq!(bounds.min, pos2(50.0, 50.0));
        assert_eq!(bounds.width(), 50.0);
        assert_eq!(bounds.height(), 40.0);
    }

    #[test]
    fn dragging_up_left_flips_the_box() {
        let mut page = Page::new(800.0, 600.0);
        let mut history = History::new();
        let mut selection = Selection::default();
        let settings = ToolSettings::default();
        let mut effects = Vec::new();
        let mut ctx = ToolContext {
            page: &mut page,
            history: &mut history,
            selection: &mut selection,
            settings: &settings,
            effects: &mut effects,
        };

        let mut tool = ShapeTool::default();
        tool.on_pointer_down(pos2(100.0, 100.0), &mut ctx);
        tool.on_pointer_up(pos2(40.0, 70.0), &mut ctx);

        let bounds = page.elements()[0].bounds();
        assert_eq!(bounds.min, pos2(40.0, 70.0));
        assert_eq!(bounds.max, pos2(100.0, 100.0));
    }
}
