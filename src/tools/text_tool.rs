use egui::Pos2;
use log::debug;

use super::{Tool, ToolContext, ToolEffect, ToolKind};
use crate::element::PlannerElement;
use crate::hit_testing;

/// Text placement and the single edit session.
///
/// Pointer-down on empty canvas creates an empty text element and
/// immediately enters edit mode for it; pointer-down on an existing
/// text element re-enters editing there instead of stacking a new
/// box. Only one element is ever in edit mode at a time.
#[derive(Debug, Default)]
pub struct TextTool {
    editing: Option<u64>,
}

impl TextTool {
    /// Element currently in edit mode, if any.
    pub fn editing(&self) -> Option<u64> {
        self.editing
    }

    /// Close the edit session (focus loss, tool switch).
    pub fn finish_editing(&mut self) {
        self.editing = None;
    }
}

impl Tool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let hit_text = hit_testing::pick_topmost(ctx.page, pos).filter(|&id| {
            ctx.page
                .find_element(id)
                .is_some_and(|e| matches!(e, PlannerElement::Text(_)))
        });

        let id = match hit_text {
            Some(id) => {
                debug!("re-entering edit mode for text {id}");
                id
            }
            None => {
                ctx.history.save(ctx.page);
                let id = ctx.page.allocate_id();
                ctx.page
                    .add_element(crate::element::factory::create_text(id, pos));
                ctx.modified();
                id
            }
        };
        self.editing = Some(id);
        ctx.effects.push(ToolEffect::BeginTextEdit(id));
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) {}

    fn on_pointer_up(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) {}

    fn cancel(&mut self, _ctx: &mut ToolContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;
    use crate::page::Page;
    use crate::selection::Selection;
    use crate::tools::ToolSettings;
    use egui::pos2;

    #[test]
    fn tap_on_empty_canvas_creates_and_edits() {
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

        let mut tool = TextTool::default();
        tool.on_pointer_down(pos2(100.0, 100.0), &mut ctx);

        assert_eq!(tool.editing(), Some(1));
        assert!(effects.contains(&ToolEffect::BeginTextEdit(1)));
        assert!(matches!(page.elements()[0], PlannerElement::Text(_)));
    }

    #[test]
    fn tap_on_existing_text_reuses_it() {
        let mut page = Page::new(800.0, 600.0);
        let mut history = History::new();
        let mut selection = Selection::default();
        let settings = ToolSettings::default();

        let mut tool = TextTool::default();
        for _ in 0..2 {
            let mut effects = Vec::new();
            let mut ctx = ToolContext {
                page: &mut page,
                history: &mut history,
                selection: &mut selection,
                settings: &settings,
                effects: &mut effects,
            };
            tool.on_pointer_down(pos2(100.0, 100.0), &mut ctx);
        }

        // Second tap landed on the box created by the first.
        assert_eq!(page.elements().len(), 1);
        assert_eq!(tool.editing(), Some(1));
    }
}
