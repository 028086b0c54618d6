use tracing::debug;

use crate::config::{get_global_settings, Settings};
use crate::error::{TsdbError, TsdbResult};
use crate::iter::{BoxedSeriesIter, EmptySeriesSet, MergedSeriesSet, UniqueSeriesSet};
use crate::storage::Series;

/// A forward-only set of series sorted by labels, where no two consecutive entries share a
/// label set.
///
/// Iteration yields `Ok` entries until exhausted, or ends with a single `Err` if an input
/// failed. Nothing is yielded after the error, which stays available through [`SeriesSet::err`].
pub enum SeriesSet {
    Empty(EmptySeriesSet),
    Unique(UniqueSeriesSet),
    Merged(Box<MergedSeriesSet>),
}

impl SeriesSet {
    pub fn empty() -> Self {
        SeriesSet::Empty(EmptySeriesSet)
    }

    pub fn err(&self) -> Option<&TsdbError> {
        match self {
            SeriesSet::Empty(_) => None,
            SeriesSet::Unique(set) => set.err(),
            SeriesSet::Merged(set) => set.err(),
        }
    }
}

impl Iterator for SeriesSet {
    type Item = TsdbResult<Series>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SeriesSet::Empty(set) => set.next(),
            SeriesSet::Unique(set) => set.next(),
            SeriesSet::Merged(set) => set.next(),
        }
    }
}

/// Merges all series sets into a single series set.
///
/// Each input is assumed to be sorted by labels, as remote read guarantees. A series may be
/// split over consecutive entries of one input; those are joined into one entry. Series found
/// in several inputs are merged, with exact duplicate chunks removed.
///
/// Chunks are assumed, best effort, to be sorted by min time. If they are not, some duplicates
/// are kept, which the consumer has to handle anyway. If all inputs have sorted chunks, the
/// output chunks are sorted too.
///
/// Inputs are combined as a balanced binary tree of [`MergedSeriesSet`]s, so each emitted
/// series costs `O(log n)` comparisons.
pub fn merge_series_sets(all: Vec<BoxedSeriesIter>) -> SeriesSet {
    merge_series_sets_with_settings(all, get_global_settings())
}

pub fn merge_series_sets_with_settings(all: Vec<BoxedSeriesIter>, settings: &Settings) -> SeriesSet {
    debug!(
        inputs = all.len(),
        depth = merge_tree_depth(all.len()),
        "building series set merge tree"
    );
    build_merge_tree(all, settings)
}

fn build_merge_tree(mut all: Vec<BoxedSeriesIter>, settings: &Settings) -> SeriesSet {
    match all.len() {
        0 => SeriesSet::empty(),
        1 => all.pop().map_or_else(SeriesSet::empty, |set| {
            SeriesSet::Unique(UniqueSeriesSet::with_settings(set, settings))
        }),
        n => {
            let second = all.split_off(n / 2);
            let a = build_merge_tree(all, settings);
            let b = build_merge_tree(second, settings);
            SeriesSet::Merged(Box::new(MergedSeriesSet::new(a, b)))
        }
    }
}

/// Number of merge levels between the leaves and the root for `n` inputs.
pub fn merge_tree_depth(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    (usize::BITS - (n - 1).leading_zeros()) as usize
}
