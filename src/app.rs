use std::time::Instant;

use egui::Rect;

use crate::editor::PlannerEditor;
use crate::panels;
use crate::raster::SoftwareRasterizer;
use crate::renderer::Renderer;
use crate::services::LinkChoice;
use crate::tools::ToolSettings;

/// State of the in-shell "choose link target" dialog.
struct LinkPrompt {
    rect: Rect,
    page_text: String,
    url_text: String,
}

/// The eframe shell around [`PlannerEditor`]. Thin by design: input
/// translation and chrome live here, all editing semantics in the
/// core modules.
pub struct PlannerApp {
    editor: PlannerEditor,
    renderer: Renderer,
    rasterizer: SoftwareRasterizer,
    link_prompt: Option<LinkPrompt>,
    error_banner: Option<String>,
}

impl Default for PlannerApp {
    fn default() -> Self {
        Self {
            editor: PlannerEditor::default(),
            renderer: Renderer::default(),
            rasterizer: SoftwareRasterizer,
            link_prompt: None,
            error_banner: None,
        }
    }
}

impl PlannerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();
        // Tool settings survive restarts; the document itself goes
        // through the external persistence collaborator.
        if let Some(storage) = cc.storage {
            if let Some(settings) = eframe::get_value::<ToolSettings>(storage, "tool_settings") {
                app.editor.settings = settings;
            }
        }
        app
    }

    fn show_link_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = &mut self.link_prompt else {
            return;
        };
        let mut choice = None;
        egui::Window::new("Link target")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Page index:");
                    ui.text_edit_singleline(&mut prompt.page_text);
                });
                ui.horizontal(|ui| {
                    ui.label("or URL:");
                    ui.text_edit_singleline(&mut prompt.url_text);
                });
                ui.horizontal(|ui| {
                    if ui.button("Create").clicked() {
                        choice = Some(if let Ok(index) = prompt.page_text.parse::<usize>() {
                            LinkChoice::Page(index)
                        } else if !prompt.url_text.is_empty() {
                            LinkChoice::Url(prompt.url_text.clone())
                        } else {
                            LinkChoice::Cancelled
                        });
                    }
                    if ui.button("Cancel").clicked() {
                        choice = Some(LinkChoice::Cancelled);
                    }
                });
            });
        if let Some(choice) = choice {
            let rect = prompt.rect;
            self.link_prompt = None;
            self.editor.create_link(rect, choice);
        }
    }
}

impl eframe::App for PlannerApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, "tool_settings", &self.editor.settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.editor.begin_frame(now);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            panels::tools_panel::show(ui, &mut self.editor);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel::show(ui, &mut self.editor, &mut self.renderer);
        });

        if let Some(rect) = self.editor.take_pending_link() {
            self.link_prompt = Some(LinkPrompt {
                rect,
                page_text: String::new(),
                url_text: String::new(),
            });
        }
        self.show_link_prompt(ctx);

        if let Some(message) = self.editor.take_last_error() {
            self.error_banner = Some(message);
        }
        if let Some(message) = self.error_banner.clone() {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, &message);
                    if ui.button("Dismiss").clicked() {
                        self.error_banner = None;
                    }
                });
            });
        }

        self.editor.end_frame(now, &self.rasterizer);

        // Keep frames coming while a capture debounce is pending.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
