use std::cmp::Ordering;

use joinkit::EitherOrBoth;
use tracing::{debug, trace};

use crate::common::labels::compare_labels;
use crate::error::{TsdbError, TsdbResult};
use crate::iter::SeriesSet;
use crate::storage::{AggrChunk, Series};

/// Merges two series sets into one.
///
/// Both inputs must yield strictly increasing label sets (which every [`SeriesSet`] does).
/// The output does too: when both sides hold the same series, their chunks are merged into
/// a single entry by [`merge_chunks`].
///
/// One entry of lookahead is kept per side. Sides are primed on the first pull, and a side
/// is refilled right before its head is needed again, so an upstream error always surfaces
/// before anything past it is emitted.
pub struct MergedSeriesSet {
    a: SeriesSet,
    b: SeriesSet,
    a_head: Option<Series>,
    b_head: Option<Series>,
    a_done: bool,
    b_done: bool,
    err: Option<TsdbError>,
}

impl MergedSeriesSet {
    pub fn new(a: SeriesSet, b: SeriesSet) -> Self {
        Self {
            a,
            b,
            a_head: None,
            b_head: None,
            a_done: false,
            b_done: false,
            err: None,
        }
    }

    /// The first error seen on either side. Once set, the set yields nothing else.
    pub fn err(&self) -> Option<&TsdbError> {
        self.err.as_ref()
    }

    fn fill_heads(&mut self) -> TsdbResult<()> {
        if self.a_head.is_none() && !self.a_done {
            match self.a.next().transpose()? {
                Some(series) => self.a_head = Some(series),
                None => self.a_done = true,
            }
        }
        if self.b_head.is_none() && !self.b_done {
            match self.b.next().transpose()? {
                Some(series) => self.b_head = Some(series),
                None => self.b_done = true,
            }
        }
        Ok(())
    }

    /// Takes the head(s) sorting first. An exhausted side sorts after everything, so the
    /// other side drains one entry at a time.
    fn take_heads(&mut self) -> Option<EitherOrBoth<Series, Series>> {
        let order = match (&self.a_head, &self.b_head) {
            (None, None) => return None,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => compare_labels(&a.labels, &b.labels),
        };
        match order {
            Ordering::Less => self.a_head.take().map(EitherOrBoth::Left),
            Ordering::Greater => self.b_head.take().map(EitherOrBoth::Right),
            Ordering::Equal => self
                .a_head
                .take()
                .zip(self.b_head.take())
                .map(|(a, b)| EitherOrBoth::Both(a, b)),
        }
    }
}

impl Iterator for MergedSeriesSet {
    type Item = TsdbResult<Series>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.err.is_some() {
            return None;
        }

        if let Err(err) = self.fill_heads() {
            debug!(error = %err, "merged series set failed");
            self.a_head = None;
            self.b_head = None;
            self.err = Some(err.clone());
            return Some(Err(err));
        }

        let series = match self.take_heads()? {
            EitherOrBoth::Left(series) | EitherOrBoth::Right(series) => series,
            EitherOrBoth::Both(a, b) => {
                let a_chunks = a.chunks.len();
                let b_chunks = b.chunks.len();
                let (chunks, dropped) = merge_chunks(a.chunks, b.chunks);
                let merged = Series::new(a.labels, chunks);
                trace!(
                    labels = ?merged.labels,
                    a_chunks,
                    b_chunks,
                    dropped,
                    size = merged.estimated_size(),
                    "merged series present in both sets"
                );
                merged
            }
        };
        Some(Ok(series))
    }
}

enum ChunkStep {
    TakeA,
    TakeB,
    SkipB,
}

/// Merges the chunks of one series seen in two sets, returning the merged chunks and the
/// number of exact duplicates dropped.
///
/// Both inputs are assumed, best effort, to be sorted by `min_time`. If they are, so is the
/// output. Chunks starting at the same time are compared in full: an exact duplicate is kept
/// once, otherwise the chunk from `b` is taken first and both are kept. Overlaps between
/// chunks that are not exact duplicates are left for the consumer to resolve.
///
/// The result is always a new vector.
pub fn merge_chunks(a: Vec<AggrChunk>, b: Vec<AggrChunk>) -> (Vec<AggrChunk>, usize) {
    let mut chunks = Vec::with_capacity(a.len() + b.len());
    let mut dropped = 0;
    let mut b_iter = b.into_iter().peekable();

    for chunk_a in a {
        loop {
            let step = match b_iter.peek() {
                None => ChunkStep::TakeA,
                Some(chunk_b) => match chunk_a.min_time.cmp(&chunk_b.min_time) {
                    Ordering::Less => ChunkStep::TakeA,
                    Ordering::Greater => ChunkStep::TakeB,
                    Ordering::Equal if chunk_a.is_exact_duplicate(chunk_b) => ChunkStep::SkipB,
                    Ordering::Equal => ChunkStep::TakeB,
                },
            };
            match step {
                ChunkStep::TakeA => {
                    chunks.push(chunk_a);
                    break;
                }
                ChunkStep::TakeB => chunks.extend(b_iter.next()),
                ChunkStep::SkipB => {
                    b_iter.next();
                    dropped += 1;
                }
            }
        }
    }
    chunks.extend(b_iter);

    (chunks, dropped)
}
