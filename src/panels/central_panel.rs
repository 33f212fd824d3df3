use egui::{Event, Sense, Ui, Vec2};

use crate::editor::PlannerEditor;
use crate::input::{TouchPhase, TouchPoint};
use crate::renderer::Renderer;

/// The canvas surface: lays out the viewport, translates egui input
/// into core pointer/touch events, and renders the active page.
pub fn show(ui: &mut Ui, editor: &mut PlannerEditor, renderer: &mut Renderer) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());

    let page_size = {
        let page = editor.active_page();
        Vec2::new(page.width, page.height)
    };
    editor.viewport.view_center = response.rect.center();
    editor.viewport.canvas_size = page_size;

    let touches: Vec<TouchPoint> = ui.ctx().input(|input| {
        input
            .events
            .iter()
            .filter_map(|event| match event {
                Event::Touch { id, phase, pos, .. } => Some(TouchPoint {
                    id: id.0,
                    phase: match phase {
                        egui::TouchPhase::Start => TouchPhase::Started,
                        egui::TouchPhase::Move => TouchPhase::Moved,
                        egui::TouchPhase::End => TouchPhase::Ended,
                        egui::TouchPhase::Cancel => TouchPhase::Cancelled,
                    },
                    pos: *pos,
                }),
                _ => None,
            })
            .collect()
    });

    if !touches.is_empty() {
        editor.handle_touches(&touches);
    } else if let Some(pos) = response.interact_pointer_pos() {
        if response.drag_started() || response.clicked() {
            editor.pointer_down(pos);
        }
        if response.dragged() {
            editor.pointer_move(pos);
        }
        if response.drag_stopped() || response.clicked() {
            editor.pointer_up(pos);
        }
    }

    ui.input(|input| {
        if input.modifiers.command && input.key_pressed(egui::Key::Z) {
            if input.modifiers.shift {
                editor.redo();
            } else {
                editor.undo();
            }
        }
        if editor.editing_text().is_none()
            && (input.key_pressed(egui::Key::Delete) || input.key_pressed(egui::Key::Backspace))
        {
            editor.delete_selection();
        }
    });

    renderer.render(&painter, editor);
}
