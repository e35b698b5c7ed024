//! CSR (Compressed Sparse Row) link graph
//!
//! Pages are interned to dense [`PageId`]s in first-encounter order. Outbound
//! records are stored contiguously so rank propagation can scatter along them
//! without hashing.
//!
//! # CSR Format
//!
//! ```text
//! Records: a b c      (a → b, a → c)
//!          b c c      (b → c twice)
//!          c          (no links)
//!
//! CSR:
//!   row_offsets: [0, 2, 4, 4]  // a: links [0..2), b: [2..4), c: [4..4)
//!   col_indices: [1, 2, 2, 2]
//!   out_degrees: [2, 2, 0]     // c has no entry, so it is a sink
//! ```

use indexmap::IndexSet;

/// Page identifier (zero-indexed, first-encounter order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u32);

impl PageId {
    /// Position of this page in per-page vectors
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Outbound-link record of a source page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutLinks<'a> {
    /// The page was listed without any destinations
    NoLinks,
    /// Destinations in input order, repeats preserved
    Links(&'a [u32]),
}

impl OutLinks<'_> {
    /// Number of listed destinations (the sentinel counts as 0)
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::NoLinks => 0,
            Self::Links(links) => links.len(),
        }
    }

    /// True for the "no links" sentinel
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable web graph produced by [`GraphBuilder`](super::GraphBuilder)
///
/// Holds the universal page set, the outbound records, the out-degree table
/// and the sink set. None of these change after construction.
///
/// # Example
///
/// ```
/// use trueno_rank::GraphBuilder;
///
/// let graph = GraphBuilder::from_records(["a b c", "b c", "c"]);
/// assert_eq!(graph.num_pages(), 3);
/// assert_eq!(graph.num_edges(), 3);
///
/// let c = graph.page_id("c").unwrap();
/// assert_eq!(graph.sinks(), &[c.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LinkGraph {
    /// Universal page set; a page's index is its `PageId`
    pages: IndexSet<String>,

    /// Forward CSR: page i's links are `col_indices[row_offsets[i]..row_offsets[i + 1]]`
    /// Length: `num_pages` + 1
    row_offsets: Vec<u32>,

    /// Forward CSR: link targets
    /// Length: `num_edges`
    col_indices: Vec<u32>,

    /// Out-degree table keyed by emitting page (0 = no entry)
    out_degrees: Vec<u32>,

    /// Whether the page appeared as the first token of a record
    has_record: Vec<bool>,

    /// Source pages in the order their first record was read
    sources: Vec<u32>,

    /// Pages without an out-degree entry, ascending
    sinks: Vec<u32>,
}

impl LinkGraph {
    #[allow(clippy::cast_possible_truncation)] // Graphs >4B pages or links not supported
    pub(crate) fn from_parts(
        pages: IndexSet<String>,
        records: Vec<Option<Vec<u32>>>,
        sources: Vec<u32>,
    ) -> Self {
        let num_pages = pages.len();

        let mut row_offsets = Vec::with_capacity(num_pages + 1);
        let mut col_indices = Vec::new();
        let mut out_degrees = Vec::with_capacity(num_pages);
        let mut has_record = Vec::with_capacity(num_pages);
        let mut sinks = Vec::new();

        let mut offset = 0_u32;
        row_offsets.push(offset);

        for (page, record) in records.iter().enumerate() {
            let links = record.as_deref().unwrap_or_default();
            let degree = links.len() as u32;
            offset += degree;
            row_offsets.push(offset);
            col_indices.extend_from_slice(links);

            out_degrees.push(degree);
            has_record.push(record.is_some());
            if degree == 0 {
                sinks.push(page as u32);
            }
        }

        Self {
            pages,
            row_offsets,
            col_indices,
            out_degrees,
            has_record,
            sources,
            sinks,
        }
    }

    /// Number of distinct pages (`N`)
    #[must_use]
    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }

    /// Total number of links, parallel links counted separately
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.col_indices.len()
    }

    /// True when no page has been seen
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Look up the id of a page key
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn page_id(&self, name: &str) -> Option<PageId> {
        self.pages.get_index_of(name).map(|idx| PageId(idx as u32))
    }

    /// Key of a page
    #[must_use]
    pub fn page_name(&self, page: PageId) -> Option<&str> {
        self.pages.get_index(page.index()).map(String::as_str)
    }

    /// All pages in encounter order
    #[allow(clippy::cast_possible_truncation)]
    pub fn pages(&self) -> impl Iterator<Item = (PageId, &str)> + '_ {
        self.pages
            .iter()
            .enumerate()
            .map(|(idx, name)| (PageId(idx as u32), name.as_str()))
    }

    /// Outbound links of a page (empty for sinks and unknown ids)
    #[must_use]
    pub fn outgoing_links(&self, page: PageId) -> &[u32] {
        let idx = page.index();
        if idx >= self.num_pages() {
            return &[];
        }
        let start = self.row_offsets[idx] as usize;
        let end = self.row_offsets[idx + 1] as usize;
        &self.col_indices[start..end]
    }

    /// Outbound record of a page, `None` if the page never led a record
    #[must_use]
    pub fn record(&self, page: PageId) -> Option<OutLinks<'_>> {
        if !*self.has_record.get(page.index())? {
            return None;
        }
        let links = self.outgoing_links(page);
        Some(if links.is_empty() {
            OutLinks::NoLinks
        } else {
            OutLinks::Links(links)
        })
    }

    /// Pages that appear in the source-page mapping, in record order
    ///
    /// A page that first shows up as a destination is listed where its own
    /// record was read, not where it was interned.
    pub fn source_pages(&self) -> impl Iterator<Item = PageId> + '_ {
        self.sources.iter().map(|&page| PageId(page))
    }

    /// Out-degree table entry, `None` when the page emits no links
    #[must_use]
    pub fn out_degree(&self, page: PageId) -> Option<u32> {
        self.out_degrees
            .get(page.index())
            .copied()
            .filter(|&degree| degree > 0)
    }

    /// Sink set: pages with no out-degree entry, ascending ids
    #[must_use]
    pub fn sinks(&self) -> &[u32] {
        &self.sinks
    }

    /// Whether a page is a sink
    #[must_use]
    pub fn is_sink(&self, page: PageId) -> bool {
        self.sinks.binary_search(&page.0).is_ok()
    }

    /// Raw CSR components (`row_offsets`, `col_indices`, `out_degrees`)
    #[must_use]
    pub fn csr_components(&self) -> (&[u32], &[u32], &[u32]) {
        (&self.row_offsets, &self.col_indices, &self.out_degrees)
    }

    /// Drop a page's out-degree entry while keeping its links
    #[cfg(test)]
    pub(crate) fn clear_out_degree(&mut self, page: PageId) {
        self.out_degrees[page.index()] = 0;
    }
}
