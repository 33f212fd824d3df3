use eframe_planner::{Page, PlannerEditor, ToolKind};
use egui::{Vec2, pos2};

fn identity_editor() -> PlannerEditor {
    let mut editor = PlannerEditor::new(Page::new(768.0, 1024.0));
    editor.viewport.canvas_size = Vec2::new(768.0, 1024.0);
    editor.viewport.view_center = pos2(384.0, 512.0);
    editor
}

fn draw_stroke(editor: &mut PlannerEditor, from: egui::Pos2, to: egui::Pos2) {
    editor.set_tool(ToolKind::Pen);
    editor.pointer_down(from);
    editor.pointer_move(from + (to - from) / 2.0);
    editor.pointer_move(to);
    editor.pointer_up(to);
}

#[test]
fn undo_then_redo_restores_exact_element_list() {
    let mut editor = identity_editor();

    draw_stroke(&mut editor, pos2(10.0, 10.0), pos2(60.0, 40.0));
    draw_stroke(&mut editor, pos2(100.0, 100.0), pos2(150.0, 160.0));

    // Move the second stroke with the select tool.
    editor.set_tool(ToolKind::Select);
    editor.pointer_down(pos2(125.0, 130.0));
    editor.pointer_move(pos2(145.0, 130.0));
    editor.pointer_up(pos2(145.0, 130.0));

    let final_state = editor.active_page().elements().to_vec();

    editor.undo();
    let undone_state = editor.active_page().elements().to_vec();
    assert_ne!(undone_state, final_state);

    editor.redo();
    assert_eq!(editor.active_page().elements(), &final_state[..]);
}

#[test]
fn multi_level_undo_walks_back_to_empty() {
    let mut editor = identity_editor();

    draw_stroke(&mut editor, pos2(10.0, 10.0), pos2(60.0, 40.0));
    draw_stroke(&mut editor, pos2(100.0, 100.0), pos2(150.0, 160.0));
    assert_eq!(editor.active_page().elements().len(), 2);

    editor.undo();
    assert_eq!(editor.active_page().elements().len(), 1);
    editor.undo();
    assert!(editor.active_page().elements().is_empty());

    // Nothing left: further undo is a no-op, not an error.
    editor.undo();
    assert!(editor.active_page().elements().is_empty());

    editor.redo();
    editor.redo();
    assert_eq!(editor.active_page().elements().len(), 2);
}

#[test]
fn one_stroke_is_one_history_step() {
    let mut editor = identity_editor();
    editor.set_tool(ToolKind::Pen);

    editor.pointer_down(pos2(10.0, 10.0));
    for i in 0..50 {
        editor.pointer_move(pos2(10.0 + i as f32, 10.0 + i as f32));
    }
    editor.pointer_up(pos2(60.0, 60.0));

    editor.undo();
    assert!(editor.active_page().elements().is_empty());
    assert!(!editor.can_undo());
}

#[test]
fn new_action_after_undo_discards_redo() {
    let mut editor = identity_editor();

    draw_stroke(&mut editor, pos2(10.0, 10.0), pos2(60.0, 40.0));
    editor.undo();
    assert!(editor.can_redo());

    draw_stroke(&mut editor, pos2(200.0, 200.0), pos2(260.0, 240.0));
    assert!(!editor.can_redo());
    assert_eq!(editor.active_page().elements().len(), 1);
}

#[test]
fn bulk_delete_is_one_history_step() {
    let mut editor = identity_editor();

    draw_stroke(&mut editor, pos2(10.0, 10.0), pos2(60.0, 40.0));
    draw_stroke(&mut editor, pos2(100.0, 100.0), pos2(150.0, 160.0));

    editor.set_tool(ToolKind::Lasso);
    editor.pointer_down(pos2(0.0, 0.0));
    editor.pointer_move(pos2(400.0, 0.0));
    editor.pointer_move(pos2(400.0, 400.0));
    editor.pointer_up(pos2(0.0, 400.0));
    assert_eq!(editor.selection().len(), 2);

    editor.delete_selection();
    assert!(editor.active_page().elements().is_empty());

    editor.undo();
    assert_eq!(editor.active_page().elements().len(), 2);
}
