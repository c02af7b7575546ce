use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::thread;
use tracing_subscriber::EnvFilter;

use tidsearch::io_utils::{simple_cli_error, table_cli_error, tidsearch_cli_error};
use tidsearch::report::{render_json, render_table, TableSummary};
use tidsearch::{
    search, spawn_progress_bar, BuildConfig, CancelToken, DatabaseBuilder, IdPair, SearchConfig,
    SeedDatabase,
};

/// Build and query TinyMT trainer-ID seed tables.
#[derive(Parser)]
#[command(name = "tidsearch", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sweep a seed range and write `<tid>-<sid>.dat`.
    Create {
        #[arg(long)]
        tid: u16,
        #[arg(long)]
        sid: u16,
        /// Exclusive bound on recorded advance counts.
        #[arg(long)]
        timeout: u32,
        /// First seed, decimal or 0x-prefixed hex.
        #[arg(long, value_parser = parse_seed)]
        start: u32,
        /// Last seed (inclusive), decimal or 0x-prefixed hex.
        #[arg(long, value_parser = parse_seed)]
        end: u32,
        /// Directory the table is written to.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Worker threads, 0 for one per core.
        #[arg(long, default_value_t = 0)]
        threads: usize,
        /// Disable the progress bar.
        #[arg(long)]
        no_progress: bool,
    },
    /// List table seeds nearest to a reference seed.
    Search {
        /// Table written by `create`.
        #[arg(long)]
        path: PathBuf,
        #[arg(long, value_parser = parse_seed)]
        base_seed: u32,
        #[arg(long)]
        min_advance: u32,
        #[arg(long)]
        max_advance: u32,
        /// Number of results.
        #[arg(long)]
        count: usize,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Describe a table.
    Info {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Dump a table as `seed,advance` CSV.
    Export {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn parse_seed(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid seed '{s}': {e}"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tidsearch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Create {
            tid,
            sid,
            timeout,
            start,
            end,
            out_dir,
            threads,
            no_progress,
        } => create(
            BuildConfig {
                target: IdPair::new(tid, sid),
                timeout,
                start,
                end,
                threads,
            },
            &out_dir,
            !no_progress,
        ),
        Command::Search {
            path,
            base_seed,
            min_advance,
            max_advance,
            count,
            json,
        } => {
            let config = SearchConfig {
                base_seed,
                min_advance,
                max_advance,
                limit: count,
            };
            config
                .validate()
                .map_err(|e| tidsearch_cli_error("invalid query", e))?;
            let db = load_table(&path)?;
            let results = search(&db, &config).map_err(|e| tidsearch_cli_error("search failed", e))?;
            if json {
                println!("{}", render_json(&results)?);
            } else {
                println!("{} has been loaded.", path.display());
                println!();
                print!("{}", render_table(&results));
                println!();
            }
            Ok(())
        }
        Command::Info { path, json } => {
            let db = load_table(&path)?;
            let summary = TableSummary::of(&db);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.render());
            }
            Ok(())
        }
        Command::Export { path, output } => {
            let db = load_table(&path)?;
            db.export_csv(&output)
                .map_err(|e| table_cli_error("writing csv", &output, e))?;
            println!("{} rows written to {}", db.len(), output.display());
            Ok(())
        }
    }
}

fn load_table(path: &Path) -> Result<SeedDatabase, Box<dyn std::error::Error>> {
    SeedDatabase::load(path).map_err(|e| table_cli_error("loading table", path, e).into())
}

fn create(config: BuildConfig, out_dir: &Path, show_progress: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !out_dir.is_dir() {
        return Err(simple_cli_error(&format!(
            "output directory '{}' does not exist",
            out_dir.display()
        ))
        .into());
    }
    let builder = DatabaseBuilder::new(config).map_err(|e| tidsearch_cli_error("invalid range", e))?;
    let total = builder.seed_count();
    watch_interrupt(builder.cancel_token());

    let stop = CancelToken::new();
    let bar = show_progress.then(|| spawn_progress_bar(builder.progress(), total, stop.clone()));
    let output = builder.build();
    stop.cancel();
    if let Some(handle) = bar {
        join_progress(handle);
    }
    let output = output.map_err(|e| tidsearch_cli_error("sweep failed", e))?;

    let path = output.database.default_path(out_dir);
    output
        .database
        .save(&path)
        .map_err(|e| table_cli_error("writing table", &path, e))?;
    if output.cancelled {
        println!("{} has been created (partial, interrupted).", path.display());
    } else {
        println!("{} has been created.", path.display());
    }
    Ok(())
}

/// Wait for the progress thread; a panic there is logged, not fatal.
fn join_progress(handle: thread::JoinHandle<()>) -> bool {
    match handle.join() {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!("progress bar thread panicked");
            false
        }
    }
}

/// Translate Ctrl-C into cooperative cancellation of the sweep.
fn watch_interrupt(cancel: CancelToken) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::warn!(error = %e, "interrupt handler unavailable");
                return;
            }
        };
        if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
            tracing::warn!("interrupt received, stopping sweep");
            cancel.cancel();
        }
    });
}
