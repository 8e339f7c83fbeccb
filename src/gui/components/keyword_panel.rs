// src/gui/components/keyword_panel.rs
//
// Left keyword list. Click selects one, ctrl toggles, shift selects a range
// from the last clicked row. Selection drives all three tabs.

use eframe::egui;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Keywords");

    let mut changed = false;
    ui.horizontal(|ui| {
        if ui.button("All").clicked() {
            app.gui.selected = app.keywords.clone();
            changed = true;
        }
        if ui.button("None").clicked() {
            app.gui.selected.clear();
            changed = true;
        }
    });

    ui.separator();

    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    egui::ScrollArea::vertical()
        .id_salt("keyword_panel_scroll")
        .show(ui, |ui| {
            let w = ui.available_width();
            ui.set_min_width(w);

            for idx in 0..app.keywords.len() {
                let kw = &app.keywords[idx];
                let is_selected = app.gui.selected.contains(kw);
                if !ui.selectable_label(is_selected, kw.as_str()).clicked() {
                    continue;
                }

                let mods = ui.input(|i| i.modifiers);
                let kw = kw.clone();
                let sel = &mut app.gui.selected;
                match (mods.shift, app.gui.last_clicked) {
                    (true, Some(last)) => {
                        let (lo, hi) = if last <= idx { (last, idx) } else { (idx, last) };
                        if !mods.ctrl {
                            sel.clear();
                        }
                        for k in &app.keywords[lo..=hi] {
                            if !sel.contains(k) { sel.push(k.clone()); }
                        }
                    }
                    _ if mods.ctrl => {
                        if is_selected { sel.retain(|k| *k != kw); } else { sel.push(kw); }
                    }
                    _ => {
                        sel.clear();
                        sel.push(kw);
                    }
                }
                app.gui.last_clicked = Some(idx);
                changed = true;
            }
        });

    if changed {
        logd!("UI: Selection changed ({} keyword(s))", app.gui.selected.len());
        app.rebuild_view();
    }
}
