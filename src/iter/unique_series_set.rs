use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::common::labels::compare_labels;
use crate::config::Settings;
use crate::error::{TsdbError, TsdbResult};
use crate::iter::BoxedSeriesIter;
use crate::storage::Series;

/// Wraps one raw series set and ensures each iteration yields a single, full series.
///
/// Consecutive entries sharing a label set are collapsed into one entry whose chunks are
/// the concatenation of theirs. No chunk deduplication happens here.
pub struct UniqueSeriesSet {
    inner: BoxedSeriesIter,
    peek: Option<Series>,
    done: bool,
    err: Option<TsdbError>,
    verify_input_order: bool,
}

impl UniqueSeriesSet {
    pub fn new(inner: BoxedSeriesIter) -> Self {
        Self::with_settings(inner, &Settings::default())
    }

    pub fn with_settings(inner: BoxedSeriesIter, settings: &Settings) -> Self {
        Self {
            inner,
            peek: None,
            done: false,
            err: None,
            verify_input_order: settings.verify_input_order,
        }
    }

    pub fn err(&self) -> Option<&TsdbError> {
        self.err.as_ref()
    }

    fn fail(&mut self, err: TsdbError) -> Option<TsdbResult<Series>> {
        debug!(error = %err, "series set failed, dropping buffered series");
        self.done = true;
        self.peek = None;
        self.err = Some(err.clone());
        Some(Err(err))
    }
}

impl Iterator for UniqueSeriesSet {
    type Item = TsdbResult<Series>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.err.is_some() {
            return None;
        }

        while !self.done {
            let series = match self.inner.next() {
                Some(Ok(series)) => series,
                Some(Err(err)) => return self.fail(err),
                None => {
                    self.done = true;
                    break;
                }
            };

            let Some(peek) = self.peek.as_mut() else {
                self.peek = Some(series);
                continue;
            };

            let order = compare_labels(&series.labels, &peek.labels);
            if order == Ordering::Equal {
                // Chunks are assumed sorted and non-overlapping. If they are not, duplicates
                // survive until the consumer drops them.
                peek.chunks.extend(series.chunks);
                continue;
            }
            if order == Ordering::Less && self.verify_input_order {
                warn!(
                    previous = ?peek.labels,
                    current = ?series.labels,
                    "series set is not sorted by labels; deduplication may be incomplete"
                );
            }
            return self.peek.replace(series).map(Ok);
        }

        self.peek.take().map(Ok)
    }
}
