use egui::Ui;

use crate::editor::PlannerEditor;
use crate::element::{BrushKind, ShapeKind};
use crate::tools::{EraserMode, ToolKind};

const TOOLS: [(ToolKind, &str); 11] = [
    (ToolKind::Select, "Select"),
    (ToolKind::Pen, "Pen"),
    (ToolKind::Highlighter, "Highlight"),
    (ToolKind::Eraser, "Eraser"),
    (ToolKind::Lasso, "Lasso"),
    (ToolKind::Text, "Text"),
    (ToolKind::Shape, "Shape"),
    (ToolKind::Link, "Link"),
    (ToolKind::Sticker, "Sticker"),
    (ToolKind::Image, "Image"),
    (ToolKind::Background, "Fill"),
];

pub fn show(ui: &mut Ui, editor: &mut PlannerEditor) {
    ui.horizontal_wrapped(|ui| {
        for (kind, label) in TOOLS {
            if ui
                .selectable_label(editor.tool_kind() == kind, label)
                .clicked()
            {
                editor.set_tool(kind);
            }
        }

        ui.separator();

        if ui
            .add_enabled(editor.can_undo(), egui::Button::new("Undo"))
            .clicked()
        {
            editor.undo();
        }
        if ui
            .add_enabled(editor.can_redo(), egui::Button::new("Redo"))
            .clicked()
        {
            editor.redo();
        }
        if ui
            .add_enabled(!editor.selection().is_empty(), egui::Button::new("Delete"))
            .clicked()
        {
            editor.delete_selection();
        }
    });

    ui.horizontal_wrapped(|ui| match editor.tool_kind() {
        ToolKind::Pen => {
            ui.color_edit_button_srgba(&mut editor.settings.stroke_color);
            ui.add(
                egui::Slider::new(&mut editor.settings.stroke_width, 0.5..=20.0).text("width"),
            );
            egui::ComboBox::from_label("brush")
                .selected_text(format!("{:?}", editor.settings.brush))
                .show_ui(ui, |ui| {
                    for brush in [
                        BrushKind::Pen,
                        BrushKind::Pencil,
                        BrushKind::Marker,
                        BrushKind::Fountain,
                        BrushKind::Calligraphy,
                        BrushKind::Art,
                    ] {
                        ui.selectable_value(
                            &mut editor.settings.brush,
                            brush,
                            format!("{brush:?}"),
                        );
                    }
                });
        }
        ToolKind::Highlighter => {
            ui.color_edit_button_srgba(&mut editor.settings.highlighter_color);
            ui.add(
                egui::Slider::new(&mut editor.settings.highlighter_width, 4.0..=40.0)
                    .text("width"),
            );
        }
        ToolKind::Eraser => {
            for (mode, label) in [
                (EraserMode::Pixel, "Pixel"),
                (EraserMode::Stroke, "Stroke"),
                (EraserMode::Object, "Object"),
            ] {
                ui.radio_value(&mut editor.settings.eraser_mode, mode, label);
            }
            ui.add(egui::Slider::new(&mut editor.settings.eraser_size, 4.0..=64.0).text("size"));
        }
        ToolKind::Shape => {
            egui::ComboBox::from_label("shape")
                .selected_text(format!("{:?}", editor.settings.shape))
                .show_ui(ui, |ui| {
                    for shape in [
                        ShapeKind::Rectangle,
                        ShapeKind::Circle,
                        ShapeKind::Triangle,
                        ShapeKind::Diamond,
                        ShapeKind::Star,
                        ShapeKind::Line,
                        ShapeKind::Arrow,
                    ] {
                        ui.selectable_value(
                            &mut editor.settings.shape,
                            shape,
                            format!("{shape:?}"),
                        );
                    }
                });
            ui.checkbox(&mut editor.settings.shape_filled, "filled");
            if editor.settings.shape_filled {
                ui.color_edit_button_srgba(&mut editor.settings.fill_color);
            }
            ui.color_edit_button_srgba(&mut editor.settings.stroke_color);
        }
        ToolKind::Background => {
            ui.color_edit_button_srgba(&mut editor.settings.background_color);
        }
        ToolKind::Sticker | ToolKind::Image => {
            ui.label("source:");
            ui.text_edit_singleline(&mut editor.settings.media_src);
        }
        _ => {}
    });
}
