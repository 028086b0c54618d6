use get_size::GetSize;
use serde::{Deserialize, Serialize};

use crate::common::labels::Label;
use crate::common::types::Timestamp;
use crate::storage::AggrChunk;

/// A label set together with its chunks. This is what one step of a series set yields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[derive(GetSize)]
pub struct Series {
    pub labels: Vec<Label>,
    pub chunks: Vec<AggrChunk>,
}

impl Series {
    pub fn new(labels: Vec<Label>, chunks: Vec<AggrChunk>) -> Self {
        Self { labels, chunks }
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Estimated memory footprint, including heap allocations of labels and chunks.
    pub fn estimated_size(&self) -> usize {
        self.get_size()
    }

    pub fn min_time(&self) -> Option<Timestamp> {
        self.chunks.iter().map(|c| c.min_time).min()
    }

    pub fn max_time(&self) -> Option<Timestamp> {
        self.chunks.iter().map(|c| c.max_time).max()
    }

    /// Whether chunks are ordered by `min_time`. Merging only relies on this in a best-effort way.
    pub fn chunks_sorted(&self) -> bool {
        self.chunks.windows(2).all(|w| w[0].min_time <= w[1].min_time)
    }
}
