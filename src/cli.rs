// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use time::Date;

use crate::{
    config::{consts::CONFIG_FILE, file as config_file, options::today_at, RunConfig},
    error::{Result, TrendError},
    history::BaselinePolicy,
    keywords::{FileKeywords, KeywordProvider},
    model::{fmt_date, fmt_pct, parse_date},
    progress::NullProgress,
    runlog,
    runner::{self, Pipeline},
    source::PchomeSource,
};

#[derive(Parser, Debug)]
#[command(name = "kw_trends", version, about = "Track search-result counts for keywords and report top risers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (key = value). Defaults to ./kw_trends.conf if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output directory for history, snapshots, reports and logs.
    #[arg(short, long, global = true)]
    pub out_dir: Option<PathBuf>,

    /// Logical batch date (YYYY-MM-DD). Defaults to today at the configured offset.
    #[arg(long, global = true, value_parser = parse_date_arg)]
    pub date: Option<Date>,

    #[arg(long, global = true)]
    pub top_n: Option<usize>,

    #[arg(long, global = true)]
    pub min_count: Option<u64>,

    /// Duplicate baseline rows: "first" (stored order) or "last".
    #[arg(long, global = true, value_parser = parse_baseline_arg)]
    pub baseline: Option<BaselinePolicy>,

    /// Keyword list file, one per line.
    #[arg(short, long, global = true)]
    pub keywords: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch all keywords, append to history, write snapshot and risers report.
    Run {
        /// Pause between requests, in milliseconds.
        #[arg(long)]
        pause_ms: Option<u64>,
    },
    /// Upgrade the history file to the current layout and exit.
    Migrate,
    /// Rebuild the risers report for --date from stored history (no fetching).
    Report,
    /// Print the effective keyword list.
    Keywords,
}

fn parse_date_arg(s: &str) -> std::result::Result<Date, String> {
    parse_date(s).ok_or_else(|| format!("expected YYYY-MM-DD, got {s:?}"))
}

fn parse_baseline_arg(s: &str) -> std::result::Result<BaselinePolicy, String> {
    BaselinePolicy::parse(s).ok_or_else(|| format!("expected \"first\" or \"last\", got {s:?}"))
}

/// Defaults → config file → flags.
pub fn build_config(cli: &Cli) -> Result<RunConfig> {
    let mut cfg = RunConfig::default();

    let conf_path = cli.config.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let found = config_file::apply_file(&mut cfg, &conf_path)?;
    if cli.config.is_some() && !found {
        return Err(TrendError::Config(format!("config file {} not found", conf_path.display())));
    }

    if let Some(d) = &cli.out_dir { cfg.out_dir = d.clone(); }
    if let Some(k) = &cli.keywords { cfg.keywords_path = k.clone(); }
    if let Some(n) = cli.top_n { cfg.top_n = n; }
    if let Some(m) = cli.min_count { cfg.min_count = m; }
    if let Some(b) = cli.baseline { cfg.baseline = b; }
    if let Command::Run { pause_ms: Some(ms) } = cli.command {
        cfg.pause = std::time::Duration::from_millis(ms);
    }
    cfg.date = cli.date.unwrap_or_else(|| today_at(cfg.utc_offset));
    Ok(cfg)
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    // Config warnings are logged before the dated log file is known.
    runlog::install(RunConfig::default().utc_offset, cli.verbose);
    let cfg = build_config(&cli)?;
    runlog::init(&cfg.log_path(), cfg.utc_offset, cli.verbose);

    match cli.command {
        Command::Run { .. } => {
            let source = PchomeSource::new(&cfg.source);
            let keywords = FileKeywords::new(cfg.keywords_path.clone());
            let mut pipeline = Pipeline::new(cfg, source, keywords);
            let summary = pipeline.run(Some(&mut NullProgress))?;

            println!(
                "{}: {} keyword(s), {} failed; risers by {}",
                fmt_date(summary.date), summary.fetched, summary.failed, summary.ranking.tier.label()
            );
            for path in &summary.files_written {
                println!("Wrote {}", path.display());
            }
        }
        Command::Migrate => {
            let report = runner::migrate_only(&cfg)?;
            if report.rewritten {
                println!("Migrated {:?} → current ({} rows, {} skipped)", report.from, report.rows, report.skipped.len());
            } else {
                println!("Nothing to migrate ({:?})", report.from);
            }
        }
        Command::Report => {
            let ranking = runner::rebuild_report(&cfg)?;
            println!("Top risers {} (by {}):", fmt_date(cfg.date), ranking.tier.label());
            for o in &ranking.rows {
                println!(
                    "  {:<16} {:>10}  day {:>8}  week {:>8}",
                    o.keyword, o.count, fmt_pct(o.day_growth_pct), fmt_pct(o.week_growth_pct)
                );
            }
            println!("Wrote {}", cfg.report_path().display());
        }
        Command::Keywords => {
            for kw in FileKeywords::new(cfg.keywords_path.clone()).keywords() {
                println!("{kw}");
            }
        }
    }
    Ok(())
}
