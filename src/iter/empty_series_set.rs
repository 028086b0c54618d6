use crate::error::TsdbResult;
use crate::storage::Series;

/// A series set that contains no series.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySeriesSet;

impl Iterator for EmptySeriesSet {
    type Item = TsdbResult<Series>;

    fn next(&mut self) -> Option<Self::Item> {
        None
    }
}
