mod empty_series_set;
mod merged_series_set;
mod series_set;
mod unique_series_set;

use crate::error::TsdbResult;
use crate::storage::Series;

pub use empty_series_set::EmptySeriesSet;
pub use merged_series_set::{merge_chunks, MergedSeriesSet};
pub use series_set::*;
pub use unique_series_set::UniqueSeriesSet;

/// A raw series set, as produced by a store, replica or block. It is expected to be sorted
/// by labels, but may repeat a series over consecutive entries.
pub type BoxedSeriesIter = Box<dyn Iterator<Item = TsdbResult<Series>>>;
