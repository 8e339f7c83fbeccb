// src/gui/components/data_table.rs
//
// Read-only table over owned string rows. Numeric-looking columns are centered.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::model::STATUS_OK;

/// Columns that hold text rather than numbers.
const TEXT_COLUMNS: [&str; 3] = ["date", "keyword", "status"];

pub fn draw(ui: &mut egui::Ui, id: &str, headers: &[String], rows: &[Vec<String>]) {
    if rows.is_empty() {
        ui.label("No rows.");
        return;
    }

    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.bar_inner_margin = 7.0;
        s.handle_min_length = 48.0;
    }

    let cols = headers.len();
    let numeric: Vec<bool> = headers.iter().map(|h| !TEXT_COLUMNS.contains(&h.as_str())).collect();
    let status_col = headers.iter().position(|h| h == "status");

    let avail_h = ui.available_height();
    let mut table = TableBuilder::new(ui)
        .id_salt(id)
        .striped(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(avail_h);
    for h in headers {
        let w = if h == "keyword" || h == "status" { 160.0 } else { 90.0 };
        table = table.column(Column::initial(w).resizable(true).clip(true).at_least(40.0));
    }

    table
        .header(24.0, |mut header| {
            for (ci, h) in headers.iter().enumerate() {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    let text = RichText::new(h).strong();
                    if numeric[ci] {
                        ui.centered_and_justified(|ui| { ui.label(text); });
                    } else {
                        ui.label(text);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let data = &rows[row.index()];
                let failed = status_col
                    .and_then(|i| data.get(i))
                    .is_some_and(|s| s.as_str() != STATUS_OK);
                for ci in 0..cols {
                    let cell = data.get(ci).map(String::as_str).unwrap_or("");
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        let mut rt = RichText::new(cell);
                        if failed {
                            rt = rt.color(egui::Color32::from_rgb(0xDC, 0x61, 0x49));
                        }
                        if numeric[ci] {
                            ui.centered_and_justified(|ui| { ui.label(rt); });
                        } else {
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(rt); });
                        }
                    });
                }
            });
        });
}
