// src/gui/components/toolbar.rs

use eframe::egui::{self, widgets::Spinner};
use crate::{gui::{actions, app::App}, model::fmt_date};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let run = ui.add_enabled(
            !app.running,
            egui::Button::new(egui::RichText::new("Run batch").strong()),
        );
        if run.clicked() {
            actions::start_run(app);
        }

        if ui.add_enabled(!app.running, egui::Button::new("Reload")).clicked() {
            app.reload();
        }

        if ui.button("Copy").on_hover_text("Copy the current table as TSV").clicked() {
            actions::copy(app, ui.ctx());
        }

        if app.running {
            ui.add(Spinner::new().size(16.0));
        }

        let status = app.status.lock().map(|s| s.clone()).unwrap_or_default();
        ui.label(status);
    });

    ui.horizontal(|ui| {
        ui.weak(format!("Store: {}", app.cfg.out_dir.display()));
        if let Some(d) = app.latest_date {
            ui.weak(format!("Latest batch: {}", fmt_date(d)));
        }
        ui.weak(format!("Rows: {}", app.history.len()));
    });
}
