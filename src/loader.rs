//! Async graph loading from adjacency-list files
//!
//! One record per line: `page_id[ link_id]*`. No header, no size declaration;
//! `N` is the number of distinct ids observed.

use crate::error::{RankError, Result};
use crate::storage::{GraphBuilder, LinkGraph};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

/// Read an adjacency-list file into a [`LinkGraph`]
///
/// # Errors
///
/// `RankError::Io` if the file is missing or unreadable. No partial graph
/// is returned.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> trueno_rank::Result<()> {
/// let graph = trueno_rank::load_graph("web.txt").await?;
/// println!("{} pages", graph.num_pages());
/// # Ok(())
/// # }
/// ```
pub async fn load_graph<P: AsRef<Path>>(path: P) -> Result<LinkGraph> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| RankError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(io_error)?;
    let graph = load_reader(BufReader::new(file)).await.map_err(io_error)?;

    info!(
        path = %path.display(),
        pages = graph.num_pages(),
        links = graph.num_edges(),
        sinks = graph.sinks().len(),
        "graph loaded"
    );
    Ok(graph)
}

/// Parse records from any buffered async reader
///
/// # Errors
///
/// Propagates read failures (including invalid UTF-8).
pub async fn load_reader<R>(reader: R) -> std::io::Result<LinkGraph>
where
    R: AsyncBufRead + Unpin,
{
    let mut builder = GraphBuilder::new();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        builder.add_record(&line);
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "a b c").unwrap();
        writeln!(file, "b c").unwrap();
        writeln!(file, "c").unwrap();

        let graph = load_graph(file.path()).await.unwrap();
        assert_eq!(graph.num_pages(), 3);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.sinks().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        match load_graph(&path).await {
            Err(RankError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_reader_handles_crlf() {
        let input: &[u8] = b"a b\r\nb a\r\n\r\n";
        let graph = load_reader(input).await.unwrap();
        assert_eq!(graph.num_pages(), 2);
        assert!(graph.sinks().is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_gives_empty_graph() {
        let input: &[u8] = b"";
        let graph = load_reader(input).await.unwrap();
        assert!(graph.is_empty());
    }
}
