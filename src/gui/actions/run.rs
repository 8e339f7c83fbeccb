// src/gui/actions/run.rs
//
// "Run batch": the pipeline runs on a worker thread so the window keeps
// repainting; the result comes back over a channel and is picked up by
// `poll_run` on the UI thread.

use std::sync::mpsc::{self, TryRecvError};
use std::thread;

use crate::{
    config::options::today_at,
    gui::{app::App, progress::GuiProgress},
    keywords::FileKeywords,
    model::fmt_date,
    runlog,
    runner::Pipeline,
    source::PchomeSource,
};

pub fn start_run(app: &mut App) {
    if app.running {
        return;
    }

    let mut cfg = app.cfg.clone();
    cfg.date = today_at(cfg.utc_offset);
    runlog::set_file(&cfg.log_path());
    logf!("Run: Begin {} from GUI", fmt_date(cfg.date));

    let status = app.status.clone();
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name(s!("batch"))
        .spawn(move || {
            let mut prog = GuiProgress::new(status);
            let source = PchomeSource::new(&cfg.source);
            let keywords = FileKeywords::new(cfg.keywords_path.clone());
            let res = Pipeline::new(cfg, source, keywords).run(Some(&mut prog));
            // The receiver is gone only if the window closed mid-run.
            let _ = tx.send(res);
        });

    match spawned {
        Ok(_) => {
            app.job = Some(rx);
            app.running = true;
            app.set_status("Starting batch…");
        }
        Err(e) => {
            loge!("Run: Could not start worker: {e}");
            app.set_status(format!("Error: {e}"));
        }
    }
}

/// Check for a finished run. Called once per frame.
pub fn poll_run(app: &mut App) {
    let Some(rx) = &app.job else { return };

    let res = match rx.try_recv() {
        Ok(res) => res,
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Disconnected) => {
            app.job = None;
            app.running = false;
            loge!("Run: Worker ended without a result");
            app.set_status("Error: batch worker stopped unexpectedly");
            return;
        }
    };
    app.job = None;
    app.running = false;

    match res {
        Ok(summary) => {
            logf!(
                "Run: OK {} fetched={} failed={} tier={}",
                fmt_date(summary.date), summary.fetched, summary.failed, summary.ranking.tier.label()
            );
            app.reload();
            app.set_status(format!(
                "Batch {} done: {} keyword(s), {} failed, risers by {}",
                fmt_date(summary.date), summary.fetched, summary.failed, summary.ranking.tier.label()
            ));
        }
        Err(e) => {
            loge!("Run: Error: {e}");
            app.set_status(format!("Error: {e}"));
        }
    }
}
