use egui::{Pos2, Rect};
use log::debug;

use super::{Tool, ToolContext, ToolEffect, ToolKind};

/// Minimum hotspot edge length; smaller rubber-bands are discarded
/// silently.
pub const MIN_LINK_SIZE: f32 = 10.0;

/// Rubber-band link hotspot creation. The finished rectangle is
/// handed to the external "choose link target" collaborator; the
/// element itself is only inserted once a target comes back.
#[derive(Debug, Default)]
pub struct LinkTool {
    origin: Option<Pos2>,
    current: Option<Pos2>,
}

impl LinkTool {
    /// Live rubber-band rect for the overlay renderer.
    pub fn preview_rect(&self) -> Option<Rect> {
        match (self.origin, self.current) {
            (Some(a), Some(b)) => Some(Rect::from_two_pos(a, b)),
            _ => None,
        }
    }
}

impl Tool for LinkTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Link
    }

    fn on_pointer_down(&mut self, pos: Pos2, _ctx: &mut ToolContext<'_>) {
        self.origin = Some(pos);
        self.current = Some(pos);
    }

    fn on_pointer_move(&mut self, pos: Pos2, _ctx: &mut ToolContext<'_>) {
        if self.origin.is_some() {
            self.current = Some(pos);
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let Some(origin) = self.origin.take() else {
            return;
        };
        self.current = None;
        let rect = Rect::from_two_pos(origin, pos);
        if rect.width() < MIN_LINK_SIZE || rect.height() < MIN_LINK_SIZE {
            debug!("link rectangle below minimum size, discarded");
            return;
        }
        ctx.effects.push(ToolEffect::RequestLinkTarget(rect));
    }

    fn cancel(&mut self, _ctx: &mut ToolContext<'_>) {
        self.origin = None;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;
    use crate::page::Page;
    use crate::selection::Selection;
    use crate::tools::ToolSettings;
    use egui::pos2;

    fn run_band(from: Pos2, to: Pos2) -> Vec<ToolEffect> {
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
        let mut tool = LinkTool::default();
        tool.on_pointer_down(from, &mut ctx);
        tool.on_pointer_move(to, &mut ctx);
        tool.on_pointer_up(to, &mut ctx);
        effects
    }

    #[test]
    fn tiny_rectangle_is_rejected_silently() {
        let effects = run_band(pos2(10.0, 10.0), pos2(15.0, 40.0));
        assert!(effects.is_empty());
    }

    #[test]
    fn valid_rectangle_requests_target() {
        let effects = run_band(pos2(10.0, 10.0), pos2(60.0, 50.0));
        assert_eq!(
            effects,
            vec![ToolEffect::RequestLinkTarget(Rect::from_min_max(
                pos2(10.0, 10.0),
                pos2(60.0, 50.0)
            ))]
        );
    }
}
