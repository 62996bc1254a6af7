//! Desktop window around an [`Inspector`].

use crispy_core::config::DEFAULT_SAMPLE_TEXT;
use eframe::egui;

use crate::app::{Inspector, Status};

const TITLE: &str = "Font Width Inspector";
const WINDOW_SIZE: [f32; 2] = [900.0, 500.0];
const INFO: &str = "This tool measures text advance width using the rustybuzz shaping engine.";

struct InspectorApp {
    inspector: Inspector,
    text: String,
    /// Text of a run requested this frame, started on the next one so the
    /// status line can show it is running.
    pending: Option<String>,
}

impl InspectorApp {
    fn new(inspector: Inspector) -> Self {
        Self { inspector, text: DEFAULT_SAMPLE_TEXT.to_string(), pending: None }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Text:");
            ui.add(egui::TextEdit::singleline(&mut self.text).desired_width(150.0));

            let running = self.pending.is_some();
            if ui.add_enabled(!running, egui::Button::new("Run Check")).clicked() {
                self.inspector.begin();
                self.pending = Some(self.text.clone());
                ui.ctx().request_repaint();
            }

            let status = self.inspector.status();
            let text = egui::RichText::new(status.to_string());
            ui.label(match status {
                Status::Failed(_) => text.color(ui.visuals().error_fg_color),
                _ => text,
            });
        });
    }

    fn results(&self, ui: &mut egui::Ui) {
        let report = self.inspector.report();
        egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            egui::Grid::new("results").striped(true).num_columns(report.axes.len() + 2).show(
                ui,
                |ui| {
                    for column in report.columns() {
                        ui.strong(column);
                    }
                    ui.end_row();

                    for row in &report.rows {
                        for cell in report.cells(row) {
                            ui.label(cell);
                        }
                        ui.end_row();
                    }
                },
            );
        });
    }
}

impl eframe::App for InspectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(text) = self.pending.take() {
            self.inspector.run_check(&text);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));
        egui::TopBottomPanel::bottom("info").show(ctx, |ui| {
            ui.label(INFO);
        });
        egui::CentralPanel::default().show(ctx, |ui| self.results(ui));
    }
}

/// Open the window and block until it is closed.
///
/// The inspector, and with it the export directory, is dropped when the
/// window closes.
pub fn run(inspector: Inspector) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size(WINDOW_SIZE),
        ..Default::default()
    };
    eframe::run_native(TITLE, options, Box::new(|_cc| Ok(Box::new(InspectorApp::new(inspector)))))
}
