//! Graph storage layer
//!
//! Provides the CSR link graph and the record parser that builds it.

pub mod builder;
pub mod csr;

pub use builder::GraphBuilder;
pub use csr::{LinkGraph, OutLinks, PageId};
