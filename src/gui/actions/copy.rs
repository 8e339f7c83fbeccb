// src/gui/actions/copy.rs
use eframe::egui;
use crate::{csv::rows_to_string, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let (headers, rows) = app.current_table();
    if rows.is_empty() {
        app.set_status("Nothing to copy");
        logd!("Copy: Clicked, but there's nothing to copy");
        return;
    }

    let txt = rows_to_string(Some(headers), rows, '\t');
    logf!("Copy: tab={:?}, rows={}", app.gui.tab, rows.len());
    ui_ctx.copy_text(txt);
    app.set_status("Copied to clipboard");
}
