//! Top-N rankings by rank and by link count
//!
//! Both rankings use a stable sort. Ties in the rank listing keep the order in
//! which pages first appeared in the input; ties in the link-count listing
//! keep the order in which the pages' records were read.

use crate::storage::LinkGraph;

/// Length of each reported ranking
pub const TOP_N: usize = 50;

/// One ranked entry: page key and the metric it was sorted by
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPage<M> {
    /// Page key
    pub page: String,
    /// Sort metric
    pub metric: M,
}

/// Pages sorted by descending rank, at most `limit` entries
///
/// `ranks` is indexed by `PageId`; pages without a rank entry are skipped.
///
/// # Example
///
/// ```
/// use trueno_rank::{top_by_rank, GraphBuilder};
///
/// let graph = GraphBuilder::from_records(["a b", "b"]);
/// let top = top_by_rank(&graph, &[0.3, 0.7], 50);
/// assert_eq!(top[0].page, "b");
/// assert_eq!(top.len(), 2);
/// ```
#[must_use]
pub fn top_by_rank(graph: &LinkGraph, ranks: &[f64], limit: usize) -> Vec<RankedPage<f64>> {
    let mut ranked: Vec<(&str, f64)> = graph
        .pages()
        .filter_map(|(page, name)| ranks.get(page.index()).map(|&rank| (name, rank)))
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    collect_top(ranked, limit)
}

/// Source pages sorted by descending outbound-record length, at most `limit` entries
///
/// Historically reported as "in-link count": the metric is the number of
/// tokens listed after the page in its own record, which equals in-link count
/// only for inputs written in in-link form. Pages that never lead a record
/// are excluded; the "no links" sentinel counts as 0.
#[must_use]
pub fn top_by_link_count(graph: &LinkGraph, limit: usize) -> Vec<RankedPage<usize>> {
    let mut ranked: Vec<(&str, usize)> = graph
        .source_pages()
        .filter_map(|page| {
            let record = graph.record(page)?;
            Some((graph.page_name(page)?, record.len()))
        })
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    collect_top(ranked, limit)
}

fn collect_top<M>(ranked: Vec<(&str, M)>, limit: usize) -> Vec<RankedPage<M>> {
    ranked
        .into_iter()
        .take(limit)
        .map(|(page, metric)| RankedPage {
            page: page.to_string(),
            metric,
        })
        .collect()
}
