use eframe_planner::element::PlannerElement;
use eframe_planner::text_format::ListStyle;
use eframe_planner::{Page, PlannerEditor, ToolKind};
use egui::{Vec2, pos2};

fn identity_editor() -> PlannerEditor {
    let mut editor = PlannerEditor::new(Page::new(768.0, 1024.0));
    editor.viewport.canvas_size = Vec2::new(768.0, 1024.0);
    editor.viewport.view_center = pos2(384.0, 512.0);
    editor
}

fn text_content(editor: &PlannerEditor, id: u64) -> String {
    match editor.active_page().find_element(id).unwrap() {
        PlannerElement::Text(text) => text.content.clone(),
        other => panic!("element {id} is not text: {other:?}"),
    }
}

/// Create a text element through the text tool and type into it.
fn typed_text(editor: &mut PlannerEditor, content: &str) -> u64 {
    editor.set_tool(ToolKind::Text);
    editor.pointer_down(pos2(100.0, 100.0));
    editor.pointer_up(pos2(100.0, 100.0));
    let id = editor.editing_text().expect("edit session should be open");
    editor.update_text_content(content.to_owned());
    id
}

#[test]
fn tap_creates_text_and_opens_edit_session() {
    let mut editor = identity_editor();
    let id = typed_text(&mut editor, "groceries");
    assert_eq!(text_content(&editor, id), "groceries");
    assert_eq!(editor.editing_text(), Some(id));
}

#[test]
fn caret_line_formatting_only_touches_one_line() {
    let mut editor = identity_editor();
    let id = typed_text(&mut editor, "milk\neggs\nbread");

    // Caret inside "eggs" (offset 6 is on line 1).
    editor.toggle_list_style(ListStyle::Checkbox, Some(6));
    assert_eq!(text_content(&editor, id), "milk\n[ ] eggs\nbread");
}

#[test]
fn full_text_formatting_applies_to_every_line() {
    let mut editor = identity_editor();
    let id = typed_text(&mut editor, "milk\neggs");
    editor.finish_text_edit();

    // No edit session: select the element, format everything.
    editor.set_tool(ToolKind::Select);
    editor.pointer_down(pos2(110.0, 110.0));
    editor.pointer_up(pos2(110.0, 110.0));
    assert!(editor.selection().contains(id));

    editor.toggle_list_style(ListStyle::Numbered, None);
    assert_eq!(text_content(&editor, id), "1. milk\n2. eggs");
}

#[test]
fn formatting_replaces_an_existing_prefix() {
    let mut editor = identity_editor();
    let id = typed_text(&mut editor, "• milk");
    editor.toggle_list_style(ListStyle::Checkbox, Some(2));
    assert_eq!(text_content(&editor, id), "[ ] milk");
}

#[test]
fn checkbox_cycles_through_three_states() {
    let mut editor = identity_editor();
    let id = typed_text(&mut editor, "[ ] Buy milk");
    editor.finish_text_edit();

    editor.cycle_checkbox(id, 0);
    assert_eq!(text_content(&editor, id), "[x] Buy milk");
    editor.cycle_checkbox(id, 0);
    assert_eq!(text_content(&editor, id), "[-] Buy milk");
    editor.cycle_checkbox(id, 0);
    assert_eq!(text_content(&editor, id), "[ ] Buy milk");
}

#[test]
fn edited_away_prefix_means_state_is_lost() {
    let mut editor = identity_editor();
    let id = typed_text(&mut editor, "[x] Buy milk");

    // The user deletes the prefix by hand mid-edit; the line is plain
    // text now and clicking where the checkbox was does nothing.
    editor.update_text_content("Buy milk".to_owned());
    editor.finish_text_edit();
    editor.cycle_checkbox(id, 0);
    assert_eq!(text_content(&editor, id), "Buy milk");
}

#[test]
fn formatting_is_undoable() {
    let mut editor = identity_editor();
    let id = typed_text(&mut editor, "milk");
    editor.toggle_list_style(ListStyle::Bullet, Some(0));
    assert_eq!(text_content(&editor, id), "• milk");

    editor.undo();
    assert_eq!(text_content(&editor, id), "milk");
}
