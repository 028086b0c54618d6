use std::collections::BTreeMap;

use ::rand::prelude::*;

use crate::common::labels::{new_labels, Label, METRIC_NAME_LABEL};
use crate::common::types::Timestamp;
use crate::storage::{AggrChunk, Series};

pub fn create_rng(seed: Option<u64>) -> Result<StdRng, String> {
    if let Some(seed) = seed {
        Ok(StdRng::seed_from_u64(seed))
    } else {
        match StdRng::from_rng(thread_rng()) {
            Err(e) => Err(format!("Error constructing rng {:?}", e)),
            Ok(rng) => Ok(rng),
        }
    }
}

const CHUNK_SPAN: Timestamp = 120_000;

/// Generates replicas of one logical set of series. Every replica holds a subset of the
/// series, and of their chunks, of the full set. Chunk contents depend only on the series
/// and the chunk position, so a chunk seen in two replicas is an exact duplicate.
pub struct ReplicaGenerator {
    series: Vec<Series>,
}

impl ReplicaGenerator {
    pub fn new(rng: &mut StdRng, num_series: usize, chunks_per_series: usize) -> Self {
        let mut all_labels: Vec<Vec<Label>> = (0..num_series)
            .map(|i| {
                let mut labels = vec![
                    Label::new(METRIC_NAME_LABEL, format!("metric_{}", i % 7)),
                    Label::new("instance", format!("host-{i}")),
                ];
                if i % 3 == 0 {
                    labels.push(Label::new("zone", format!("z{}", i % 2)));
                }
                new_labels(labels)
            })
            .collect();
        all_labels.sort();

        let series = all_labels
            .into_iter()
            .enumerate()
            .map(|(i, labels)| {
                let start: Timestamp = rng.gen_range(0..CHUNK_SPAN);
                let chunks = (0..chunks_per_series)
                    .map(|k| {
                        let min_time = start + k as Timestamp * CHUNK_SPAN;
                        let data = vec![i as u8, k as u8, rng.gen::<u8>()];
                        AggrChunk::with_raw(min_time, min_time + CHUNK_SPAN - 1, data)
                    })
                    .collect();
                Series::new(labels, chunks)
            })
            .collect();

        Self { series }
    }

    pub fn full(&self) -> Vec<Series> {
        self.series.clone()
    }

    /// A random subset of the full set. With `split`, a series may be spread over two
    /// consecutive entries.
    pub fn replica(&self, rng: &mut StdRng, keep_ratio: f64, split: bool) -> Vec<Series> {
        let mut result = Vec::with_capacity(self.series.len());
        for series in &self.series {
            if !rng.gen_bool(keep_ratio) {
                continue;
            }
            let chunks: Vec<AggrChunk> = series
                .chunks
                .iter()
                .filter(|_| rng.gen_bool(0.6))
                .cloned()
                .collect();
            if split && chunks.len() >= 2 && rng.gen_bool(0.5) {
                let at = rng.gen_range(1..chunks.len());
                result.push(Series::new(series.labels.clone(), chunks[..at].to_vec()));
                result.push(Series::new(series.labels.clone(), chunks[at..].to_vec()));
            } else {
                result.push(Series::new(series.labels.clone(), chunks));
            }
        }
        result
    }
}

/// The expected merge of `inputs`: one entry per label set, holding the union of its chunks
/// ordered by min time.
pub fn expected_merge(inputs: &[Vec<Series>]) -> Vec<Series> {
    let mut union: BTreeMap<Vec<Label>, BTreeMap<Timestamp, AggrChunk>> = BTreeMap::new();
    for series in inputs.iter().flatten() {
        let chunks = union.entry(series.labels.clone()).or_default();
        for chunk in &series.chunks {
            chunks.insert(chunk.min_time, chunk.clone());
        }
    }
    union
        .into_iter()
        .map(|(labels, chunks)| Series::new(labels, chunks.into_values().collect()))
        .collect()
}
