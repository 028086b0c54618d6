//! Merging of sorted series sets coming from several stores, replicas or blocks into one
//! sorted, duplicate-free series set.

pub mod common;
pub mod config;
pub mod error;
pub mod iter;
pub mod storage;

#[cfg(test)]
mod tests;

pub use common::labels::{compare_labels, Label};
pub use error::{TsdbError, TsdbResult};
pub use iter::{merge_series_sets, BoxedSeriesIter, SeriesSet};
pub use storage::{AggrChunk, Series};
