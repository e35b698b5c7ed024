//! Line-oriented console report
//!
//! Every writer targets `std::io::Write`, so the binary passes stdout and
//! tests pass a `Vec<u8>`. Floats are written with `{:?}` so whole values keep
//! their decimal point (`2.0`, not `2`).

use crate::algorithms::{RankedPage, StepReport, TOP_N};
use std::fmt::Debug;
use std::io::{self, Write};

/// Header of the by-rank listing
pub const RANK_HEADER: &str = "pages sorted by Pagerank";

/// Header of the by-link-count listing
pub const LINK_HEADER: &str = "pages sorted by In Link count";

/// `Run:<n> and Perplexity:<value>`
///
/// # Errors
///
/// Propagates write failures.
pub fn write_progress<W: Write>(out: &mut W, report: &StepReport) -> io::Result<()> {
    writeln!(out, "Run:{} and Perplexity:{:?}", report.run, report.perplexity)
}

/// `Perplexity at run: <n> : <value>`
///
/// # Errors
///
/// Propagates write failures.
pub fn write_convergence<W: Write>(out: &mut W, report: &StepReport) -> io::Result<()> {
    writeln!(
        out,
        "Perplexity at run: {} : {:?}",
        report.run, report.perplexity
    )
}

/// Header line then one `position - page - metric` line per entry
///
/// # Errors
///
/// Propagates write failures.
pub fn write_ranking<W, M>(out: &mut W, header: &str, entries: &[RankedPage<M>]) -> io::Result<()>
where
    W: Write,
    M: Debug,
{
    writeln!(out, "Top {TOP_N} {header}")?;
    for (position, entry) in entries.iter().enumerate() {
        writeln!(out, "{} - {} - {:?}", position + 1, entry.page, entry.metric)?;
    }
    Ok(())
}
