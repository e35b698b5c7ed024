//! Adjacency-record parser
//!
//! Turns `<page> <link1> ... <linkK>` records into a [`LinkGraph`]. Out-degree
//! is attributed to the page that leads the record, never to pages that merely
//! appear as destinations.

use super::csr::LinkGraph;
use indexmap::IndexSet;

/// Incremental builder for [`LinkGraph`]
///
/// # Example
///
/// ```
/// use trueno_rank::GraphBuilder;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_record("home about blog");
/// builder.add_record("about home");
/// builder.add_record("blog");
///
/// let graph = builder.build();
/// assert_eq!(graph.num_pages(), 3);
/// assert_eq!(graph.num_edges(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    pages: IndexSet<String>,
    /// Indexed by page id; `None` = page never led a record
    records: Vec<Option<Vec<u32>>>,
    /// Source pages in the order their first record was read
    sources: IndexSet<u32>,
}

impl GraphBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from text records in one go
    pub fn from_records<I, S>(records: I) -> LinkGraph
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for record in records {
            builder.add_record(record.as_ref());
        }
        builder.build()
    }

    /// Parse one whitespace-separated record
    ///
    /// Blank lines carry no page key and are ignored.
    pub fn add_record(&mut self, line: &str) {
        let mut tokens = line.split_whitespace();
        let Some(source) = tokens.next() else {
            return;
        };
        let links: Vec<&str> = tokens.collect();
        self.add_page(source, &links);
    }

    /// Register `source` with its outbound links
    ///
    /// An empty `links` slice stores the "no links" sentinel. A later record
    /// for the same source replaces the earlier one.
    pub fn add_page<S: AsRef<str>>(&mut self, source: &str, links: &[S]) {
        let source = self.intern(source);
        let targets: Vec<u32> = links.iter().map(|link| self.intern(link.as_ref())).collect();

        self.records.resize(self.pages.len(), None);
        self.records[source as usize] = Some(targets);
        self.sources.insert(source);
    }

    /// Number of distinct pages seen so far
    #[must_use]
    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }

    /// Freeze into an immutable graph
    #[must_use]
    pub fn build(mut self) -> LinkGraph {
        self.records.resize(self.pages.len(), None);
        LinkGraph::from_parts(self.pages, self.records, self.sources.into_iter().collect())
    }

    #[allow(clippy::cast_possible_truncation)] // Graphs >4B pages not supported
    fn intern(&mut self, key: &str) -> u32 {
        match self.pages.get_index_of(key) {
            Some(idx) => idx as u32,
            None => self.pages.insert_full(key.to_owned()).0 as u32,
        }
    }
}
