// src/gui/components/tabs.rs

use eframe::egui;
use crate::{config::state::Tab, gui::app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        for tab in Tab::ALL {
            let selected = tab == app.gui.tab;
            if ui.selectable_label(selected, tab.title()).clicked() && !selected {
                logd!("UI: Tab switch {:?} → {:?}", app.gui.tab, tab);
                app.gui.tab = tab;
            }
        }
    });
}
