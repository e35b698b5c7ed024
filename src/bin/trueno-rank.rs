//! trueno-rank CLI: rank the pages of an adjacency-list file
//!
//! Progress and rankings go to stdout; diagnostics go to stderr via `tracing`
//! (filter with `RUST_LOG`, e.g. `RUST_LOG=trueno_rank=debug`).

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trueno_rank::{report, top_by_link_count, top_by_rank, CancelToken, RankEngine, TOP_N};

#[derive(Parser)]
#[command(
    name = "trueno-rank",
    version,
    about = "PageRank with perplexity-window convergence"
)]
struct Cli {
    /// Adjacency-list file: one `page [link ...]` record per line
    input: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let graph = trueno_rank::load_graph(&cli.input).await?;

    let mut engine = RankEngine::new(graph);
    engine.initialize().context("cannot rank input")?;

    let cancel = CancelToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    tokio::task::spawn_blocking(move || rank_and_report(engine, &cancel))
        .await
        .context("rank task failed")?
}

fn rank_and_report(mut engine: RankEngine, cancel: &CancelToken) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut progress: io::Result<()> = Ok(());
    let last = engine.run(cancel, |step| {
        if progress.is_ok() {
            progress = report::write_progress(&mut out, step);
        }
    })?;
    progress.context("failed to write progress")?;
    report::write_convergence(&mut out, &last)?;

    let by_rank = top_by_rank(engine.graph(), engine.ranks(), TOP_N);
    report::write_ranking(&mut out, report::RANK_HEADER, &by_rank)?;

    let by_links = top_by_link_count(engine.graph(), TOP_N);
    report::write_ranking(&mut out, report::LINK_HEADER, &by_links)?;

    out.flush()?;
    Ok(())
}
