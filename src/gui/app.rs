// src/gui/app.rs
use std::{
    error::Error,
    path::Path,
    sync::{mpsc::Receiver, Arc, Mutex},
    time::Duration,
};

use eframe::egui;
use time::Date;

use crate::{
    config::{
        consts::CONFIG_FILE,
        file as config_file,
        state::{GuiState, Tab},
        RunConfig,
    },
    error::Result,
    history::{self, History},
    keywords::{FileKeywords, KeywordProvider},
    model::{header_names, CURRENT_COLUMNS, REPORT_COLUMNS},
    rank::Ranking,
    runlog,
    runner::{self, RunSummary},
};

use super::{
    actions,
    chart::{self, Series},
    components::{data_table, keyword_panel, tabs, toolbar},
};

pub fn run(options: eframe::NativeOptions) -> std::result::Result<(), Box<dyn Error>> {
    runlog::install(RunConfig::default().utc_offset, false);
    let cfg = load_config(Path::new(CONFIG_FILE));
    runlog::init(&cfg.log_path(), cfg.utc_offset, false);

    eframe::run_native(
        "Keyword Trends",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(cfg)))),
    )?;
    Ok(())
}

/// Defaults overlaid with the config file, if any. A broken file is logged
/// and the defaults are kept.
fn load_config(path: &Path) -> RunConfig {
    let mut cfg = RunConfig::default();
    match config_file::apply_file(&mut cfg, path) {
        Ok(true) => logd!("Config: Loaded {}", path.display()),
        Ok(false) => {}
        Err(e) => {
            loge!("Config: {e}; using defaults");
            cfg = RunConfig::default();
        }
    }
    cfg
}

pub struct App {
    pub cfg: RunConfig,
    pub gui: GuiState,

    // data on disk, as last loaded
    pub history: History,
    pub keywords: Vec<String>,
    pub latest_date: Option<Date>,
    pub ranking: Option<Ranking>,

    // views for the current selection
    pub history_headers: Vec<String>,
    pub history_rows: Vec<Vec<String>>,
    pub risers_headers: Vec<String>,
    pub risers_rows: Vec<Vec<String>>,
    pub series: Vec<Series>,

    // status/progress (the worker writes here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    pub job: Option<Receiver<Result<RunSummary>>>,
}

impl App {
    pub fn new(cfg: RunConfig) -> Self {
        let mut app = Self {
            cfg,
            gui: GuiState::default(),
            history: History::default(),
            keywords: Vec::new(),
            latest_date: None,
            ranking: None,
            history_headers: header_names(&CURRENT_COLUMNS),
            history_rows: Vec::new(),
            risers_headers: header_names(&REPORT_COLUMNS),
            risers_rows: Vec::new(),
            series: Vec::new(),
            status: Arc::new(Mutex::new(s!("Idle"))),
            running: false,
            job: None,
        };
        app.reload();
        app
    }

    pub fn set_status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    /// Re-read the history file and rebuild everything derived from it.
    pub fn reload(&mut self) {
        let path = self.cfg.history_path();
        match history::load(&path) {
            Ok(loaded) => {
                logf!(
                    "Load: {} rows from {} ({:?}, {} skipped)",
                    loaded.history.len(), path.display(), loaded.layout, loaded.skipped.len()
                );
                self.history = loaded.history;
                if loaded.skipped.is_empty() {
                    self.set_status(format!("Loaded {} row(s)", self.history.len()));
                } else {
                    self.set_status(format!(
                        "Loaded {} row(s), skipped {} malformed",
                        self.history.len(), loaded.skipped.len()
                    ));
                }
            }
            Err(e) => {
                loge!("Load: {e}");
                self.history = History::default();
                self.set_status(format!("Error: {e}"));
            }
        }

        // Keywords: everything with history, then configured ones not yet fetched.
        let mut keywords = self.history.keywords();
        for kw in FileKeywords::new(self.cfg.keywords_path.clone()).keywords() {
            if !keywords.contains(&kw) {
                keywords.push(kw);
            }
        }
        self.keywords = keywords;

        let known = &self.keywords;
        self.gui.selected.retain(|k| known.contains(k));
        if self.gui.selected.is_empty() {
            self.gui.selected = self.keywords.clone();
        }
        self.gui.last_clicked = None;

        self.latest_date = self.history.records().iter().map(|o| o.date).max();
        self.ranking = self
            .latest_date
            .and_then(|d| runner::ranking_from_history(&self.history, d, &self.cfg));

        self.rebuild_view();
    }

    /// Rebuild table rows and chart series for the current selection.
    pub fn rebuild_view(&mut self) {
        let sel = &self.gui.selected;
        self.history_rows = self.history.records().iter()
            .rev()
            .filter(|o| sel.contains(&o.keyword))
            .map(|o| o.to_row(&CURRENT_COLUMNS))
            .collect();

        self.risers_rows = self.ranking.as_ref()
            .map(|r| r.rows.iter().map(|o| o.to_row(&REPORT_COLUMNS)).collect())
            .unwrap_or_default();

        self.series = chart::series(&self.history, sel, self.cfg.baseline);
    }

    /// Headers and rows behind the active tab.
    pub fn current_table(&self) -> (&[String], &[Vec<String>]) {
        match self.gui.tab {
            Tab::Risers => (&self.risers_headers, &self.risers_rows),
            Tab::History | Tab::Chart => (&self.history_headers, &self.history_rows),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        actions::poll_run(self);
        if self.running {
            ctx.request_repaint_after(Duration::from_millis(200));
        }

        egui::SidePanel::left("keywords")
            .resizable(false)
            .show(ctx, |ui| keyword_panel::draw(ui, self));

        egui::CentralPanel::default().show(ctx, |ui| {
            toolbar::draw(ui, self);
            ui.separator();
            tabs::draw(ui, self);
            ui.separator();

            match self.gui.tab {
                Tab::History => data_table::draw(ui, "history_table", &self.history_headers, &self.history_rows),
                Tab::Risers => {
                    if let Some(r) = &self.ranking {
                        ui.weak(format!("Ranked by {}", r.tier.label()));
                    }
                    data_table::draw(ui, "risers_table", &self.risers_headers, &self.risers_rows);
                }
                Tab::Chart => chart::draw(ui, &self.series),
            }
        });
    }
}
