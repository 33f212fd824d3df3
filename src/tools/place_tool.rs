use egui::{Pos2, Rect, Vec2};

use super::{Tool, ToolContext, ToolKind};
use crate::element::{Element, factory};

/// Tap-to-place for stickers and images: the element drops centered
/// on the pointer and can be dragged into position until release.
#[derive(Debug)]
pub struct PlaceTool {
    kind: ToolKind,
    active: Option<u64>,
}

impl PlaceTool {
    pub fn sticker() -> Self {
        Self {
            kind: ToolKind::Sticker,
            active: None,
        }
    }

    pub fn image() -> Self {
        Self {
            kind: ToolKind::Image,
            active: None,
        }
    }
}

impl Tool for PlaceTool {
    fn kind(&self) -> ToolKind {
        self.kind
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        if ctx.settings.media_src.is_empty() {
            // Nothing picked in the asset drawer yet.
            return;
        }
        ctx.history.save(ctx.page);
        let id = ctx.page.allocate_id();
        let rect = Rect::from_center_size(pos, Vec2::splat(ctx.settings.media_size));
        let element = if self.kind == ToolKind::Sticker {
            factory::create_sticker(id, ctx.settings.media_src.clone(), rect)
        } else {
            factory::create_image(id, ctx.settings.media_src.clone(), rect)
        };
        ctx.page.add_element(element);
        self.active = Some(id);
        ctx.modified();
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        let Some(id) = self.active else {
            return;
        };
        if let Some(element) = ctx.page.find_element_mut(id) {
            let rect = Rect::from_center_size(pos, element.bounds().size());
            element.set_bounds(rect);
            ctx.modified();
        }
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) {
        self.active = None;
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(id) = self.active.take() {
            ctx.page.remove_element(id);
            ctx.modified();
        }
    }
}
