use std::collections::VecDeque;

use crate::common::labels::{labels_from_strings, Label};
use crate::common::types::Timestamp;
use crate::error::{TsdbError, TsdbResult};
use crate::iter::BoxedSeriesIter;
use crate::storage::{AggrChunk, Series};

pub fn labels(ss: &[&str]) -> Vec<Label> {
    labels_from_strings(ss).unwrap()
}

pub fn series(ss: &[&str], chunks: Vec<AggrChunk>) -> Series {
    Series::new(labels(ss), chunks)
}

pub fn chunk(min_time: Timestamp, max_time: Timestamp, data: &[u8]) -> AggrChunk {
    AggrChunk::with_raw(min_time, max_time, data.to_vec())
}

pub fn raw_set(items: Vec<Series>) -> BoxedSeriesIter {
    Box::new(items.into_iter().map(Ok))
}

/// Drains a series set, returning the series seen and the error it ended with, if any.
/// Panics if anything is yielded after an error.
pub fn collect_series<I>(set: I) -> (Vec<Series>, Option<TsdbError>)
where
    I: Iterator<Item = TsdbResult<Series>>,
{
    let mut got = Vec::new();
    let mut err = None;
    for item in set {
        assert!(err.is_none(), "series set yielded {item:?} after an error");
        match item {
            Ok(series) => got.push(series),
            Err(e) => err = Some(e),
        }
    }
    (got, err)
}

/// A raw series set yielding `items`, then failing with an upstream error.
/// It panics if polled again after failing.
pub struct FailingSeriesIter {
    items: VecDeque<Series>,
    message: String,
    failed: bool,
}

impl Iterator for FailingSeriesIter {
    type Item = TsdbResult<Series>;

    fn next(&mut self) -> Option<Self::Item> {
        assert!(!self.failed, "series set polled after failure");
        match self.items.pop_front() {
            Some(series) => Some(Ok(series)),
            None => {
                self.failed = true;
                Some(Err(TsdbError::Upstream(self.message.clone())))
            }
        }
    }
}

pub fn failing_set(items: Vec<Series>, message: &str) -> BoxedSeriesIter {
    Box::new(FailingSeriesIter {
        items: items.into(),
        message: message.to_string(),
        failed: false,
    })
}

pub fn assert_strictly_increasing(got: &[Series]) {
    for pair in got.windows(2) {
        assert_eq!(
            crate::common::labels::compare_labels(&pair[0].labels, &pair[1].labels),
            std::cmp::Ordering::Less,
            "{:?} must sort before {:?}",
            pair[0].labels,
            pair[1].labels
        );
    }
}
