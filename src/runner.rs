// src/runner.rs
//
// Batch orchestrator. One call to `Pipeline::run` walks
//   Init → Migrate → Fetch → Snapshot → Enrich → Append → Rank → Done
// in a straight line. Per-keyword fetch failures live in the observation's
// status and never stop the run; only store failures are fatal, and those are
// logged before being returned with the stage they happened in.

use std::path::PathBuf;
use std::thread;

use time::Date;

use crate::{
    config::RunConfig,
    error::{Result, TrendError},
    file, growth,
    history::{self, BaselinePolicy, History, MigrationReport},
    keywords::KeywordProvider,
    model::{fmt_date, header_names, Observation, REPORT_COLUMNS, V1_COLUMNS},
    progress::Progress,
    rank::{self, Ranking},
    source::MetricSource,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Init,
    Migrate,
    Fetch,
    Snapshot,
    Enrich,
    Append,
    Rank,
    Done,
}

/// Summary of what one run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub date: Date,
    pub stage: Stage,
    pub fetched: usize,
    pub failed: usize,
    pub migrated: bool,
    pub skipped_history_rows: usize,
    pub ranking: Ranking,
    pub files_written: Vec<PathBuf>,
}

pub struct Pipeline<S, K> {
    cfg: RunConfig,
    source: S,
    keywords: K,
    stage: Stage,
}

impl<S: MetricSource, K: KeywordProvider> Pipeline<S, K> {
    pub fn new(cfg: RunConfig, source: S, keywords: K) -> Self {
        Self { cfg, source, keywords, stage: Stage::Init }
    }

    pub fn config(&self) -> &RunConfig { &self.cfg }
    pub fn stage(&self) -> Stage { self.stage }

    /// Run one batch. `progress` can be None (no UI updates) or Some(&mut impl Progress).
    pub fn run(&mut self, mut progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
        let res = self.run_inner(progress.as_deref_mut().map(|p| p as &mut dyn Progress));
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        res.map_err(|e| {
            loge!("Fatal error during {:?}: {e}", self.stage);
            e.at(self.stage)
        })
    }

    fn enter(&mut self, stage: Stage) {
        logd!("Run: {:?} → {:?}", self.stage, stage);
        self.stage = stage;
    }

    fn run_inner(&mut self, mut progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
        self.stage = Stage::Init;
        let date = self.cfg.date;
        logf!("Run: begin {} (out_dir={})", fmt_date(date), self.cfg.out_dir.display());
        file::ensure_directory(&self.cfg.out_dir)?;

        // ---------- Migrate ----------
        self.enter(Stage::Migrate);
        let history_path = self.cfg.history_path();
        let migration = history::migrate(&history_path)?;
        let loaded = history::load(&history_path)?;
        let skipped_history_rows = migration.skipped.len() + loaded.skipped.len();

        // ---------- Fetch ----------
        self.enter(Stage::Fetch);
        let keywords = self.keywords.keywords();
        if let Some(p) = progress.as_deref_mut() {
            p.begin(keywords.len());
            p.log(&format!("Fetching {} keyword(s)…", keywords.len()));
        }
        let batch = self.fetch_all(date, &keywords, progress.as_deref_mut().map(|p| p as &mut dyn Progress));
        let failed = batch.iter().filter(|o| !o.is_ok()).count();

        // ---------- Snapshot ----------
        self.enter(Stage::Snapshot);
        let mut written = Vec::with_capacity(3);
        let snapshot_path = self.cfg.snapshot_path();
        let snap_rows: Vec<Vec<String>> = batch.iter().map(|o| o.to_row(&V1_COLUMNS)).collect();
        file::write_table(&snapshot_path, &header_names(&V1_COLUMNS), &snap_rows)?;

        // ---------- Enrich ----------
        self.enter(Stage::Enrich);
        let enriched = growth::compute(batch, &loaded.history, self.cfg.baseline);

        // ---------- Append ----------
        self.enter(Stage::Append);
        history::append(&history_path, loaded.header.as_deref(), &enriched)?;
        logf!("Written: {}", history_path.display());
        logf!("Written: {}", snapshot_path.display());
        written.push(history_path);
        written.push(snapshot_path);

        // ---------- Rank ----------
        self.enter(Stage::Rank);
        let ranking = rank::rank(&enriched, self.cfg.top_n, self.cfg.min_count);
        let report_path = self.cfg.report_path();
        write_report(&report_path, &ranking)?;
        logf!(
            "Written: {} ({} row(s), tier: {})",
            report_path.display(), ranking.rows.len(), ranking.tier.label()
        );
        written.push(report_path);

        self.enter(Stage::Done);
        logf!("Log file: {}", self.cfg.log_path().display());
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Done: {} fetched, {} failed", enriched.len() - failed, failed));
        }

        Ok(RunSummary {
            date,
            stage: self.stage,
            fetched: enriched.len(),
            failed,
            migrated: migration.rewritten,
            skipped_history_rows,
            ranking,
            files_written: written,
        })
    }

    /// Strictly sequential, paced fetches.
    fn fetch_all(&mut self, date: Date, keywords: &[String], mut progress: Option<&mut dyn Progress>) -> Vec<Observation> {
        let mut batch = Vec::with_capacity(keywords.len());
        for (i, kw) in keywords.iter().enumerate() {
            if i > 0 && !self.cfg.pause.is_zero() {
                thread::sleep(self.cfg.pause);
            }
            let got = self.source.fetch(kw, date);
            logf!("{kw} → {} ({})", got.count, got.status);

            let obs = Observation::new(date, kw.as_str(), got.count, got.status);
            if let Some(p) = progress.as_deref_mut() {
                if obs.is_ok() { p.item_done(kw, obs.count); } else { p.item_failed(kw, &obs.status); }
            }
            batch.push(obs);
        }
        batch
    }
}

/// Overwrite the top-risers report.
pub fn write_report(path: &std::path::Path, ranking: &Ranking) -> Result<()> {
    let rows: Vec<Vec<String>> = ranking.rows.iter().map(|o| o.to_row(&REPORT_COLUMNS)).collect();
    file::write_table(path, &header_names(&REPORT_COLUMNS), &rows)
}

/* ---------------- Offline operations (no fetching) ---------------- */

/// Schema migration pass only.
pub fn migrate_only(cfg: &RunConfig) -> Result<MigrationReport> {
    history::migrate(&cfg.history_path()).map_err(|e| e.at(Stage::Migrate))
}

/// Rows stored for `date`, one per keyword, in first-seen keyword order.
/// A keyword stored twice for `date` resolves to its latest row, which is the
/// one the most recent run reported.
pub fn stored_batch(history: &History, date: Date) -> Vec<Observation> {
    let idx = history.index(BaselinePolicy::LastStored);
    let mut seen = std::collections::HashSet::new();
    history.on_date(date)
        .filter(|o| seen.insert(o.keyword.as_str()))
        .filter_map(|o| idx.get(&(o.keyword.as_str(), date)).map(|r| (*r).clone()))
        .collect()
}

/// Ranking for `date` recomputed from stored rows. None when nothing is stored for it.
pub fn ranking_from_history(history: &History, date: Date, cfg: &RunConfig) -> Option<Ranking> {
    let batch = stored_batch(history, date);
    if batch.is_empty() {
        return None;
    }
    let enriched = growth::compute(batch, history, cfg.baseline);
    Some(rank::rank(&enriched, cfg.top_n, cfg.min_count))
}

/// Rebuild the risers report for `cfg.date` from stored history alone.
pub fn rebuild_report(cfg: &RunConfig) -> Result<Ranking> {
    let history_path = cfg.history_path();
    let loaded = history::migrate(&history_path)
        .and_then(|_| history::load(&history_path))
        .map_err(|e| e.at(Stage::Migrate))?;

    let ranking = ranking_from_history(&loaded.history, cfg.date, cfg)
        .ok_or_else(|| TrendError::Config(format!("no stored rows for {}", fmt_date(cfg.date))))?;

    let report_path = cfg.report_path();
    write_report(&report_path, &ranking).map_err(|e| e.at(Stage::Rank))?;
    logf!("Written: {} ({} row(s), tier: {})", report_path.display(), ranking.rows.len(), ranking.tier.label());
    Ok(ranking)
}
