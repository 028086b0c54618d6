use std::fmt::Display;
use std::str::FromStr;

use get_size::GetSize;
use serde::{Deserialize, Serialize};

use crate::common::types::Timestamp;
use crate::error::{TsdbError, TsdbResult};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(GetSize)]
#[non_exhaustive]
pub enum ChunkEncoding {
    #[default]
    Xor = 1,
}

impl ChunkEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            ChunkEncoding::Xor => "xor",
        }
    }

    pub fn to_u8(&self) -> u8 {
        *self as u8
    }
}

impl Display for ChunkEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u8> for ChunkEncoding {
    type Error = TsdbError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ChunkEncoding::Xor),
            _ => Err(TsdbError::InvalidEncoding(value.to_string())),
        }
    }
}

impl TryFrom<&str> for ChunkEncoding {
    type Error = TsdbError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            s if s.eq_ignore_ascii_case("xor") => Ok(ChunkEncoding::Xor),
            _ => Err(TsdbError::InvalidEncoding(s.to_string())),
        }
    }
}

/// An encoded payload. The merge engine never decodes it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(GetSize)]
pub struct Chunk {
    pub encoding: ChunkEncoding,
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(encoding: ChunkEncoding, data: Vec<u8>) -> Self {
        Self { encoding, data }
    }

    pub fn xor(data: Vec<u8>) -> Self {
        Self::new(ChunkEncoding::Xor, data)
    }
}

/// Aggregations a downsampled chunk may carry next to (or instead of) raw samples.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggr {
    Raw,
    Count,
    Sum,
    Min,
    Max,
    Counter,
}

impl Aggr {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggr::Raw => "raw",
            Aggr::Count => "count",
            Aggr::Sum => "sum",
            Aggr::Min => "min",
            Aggr::Max => "max",
            Aggr::Counter => "counter",
        }
    }
}

impl Display for Aggr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Aggr {
    type Err = TsdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Aggr::*;

        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Raw),
            "count" => Ok(Count),
            "sum" => Ok(Sum),
            "min" => Ok(Min),
            "max" => Ok(Max),
            "counter" => Ok(Counter),
            _ => Err(TsdbError::General(format!("invalid aggregation: {s}"))),
        }
    }
}

/// A run of samples for one series, bounded by `min_time` and `max_time` (inclusive),
/// holding one encoded chunk per available aggregation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(GetSize)]
pub struct AggrChunk {
    pub min_time: Timestamp,
    pub max_time: Timestamp,
    pub raw: Option<Chunk>,
    pub count: Option<Chunk>,
    pub sum: Option<Chunk>,
    pub min: Option<Chunk>,
    pub max: Option<Chunk>,
    pub counter: Option<Chunk>,
}

impl AggrChunk {
    pub fn new(min_time: Timestamp, max_time: Timestamp) -> Self {
        Self {
            min_time,
            max_time,
            ..Default::default()
        }
    }

    pub fn with_raw(min_time: Timestamp, max_time: Timestamp, data: Vec<u8>) -> Self {
        Self::new(min_time, max_time).with_aggr(Aggr::Raw, Chunk::xor(data))
    }

    pub fn with_aggr(mut self, aggr: Aggr, chunk: Chunk) -> Self {
        *self.slot_mut(aggr) = Some(chunk);
        self
    }

    /// Returns the chunk holding the given aggregation.
    pub fn get(&self, aggr: Aggr) -> TsdbResult<&Chunk> {
        let slot = match aggr {
            Aggr::Raw => &self.raw,
            Aggr::Count => &self.count,
            Aggr::Sum => &self.sum,
            Aggr::Min => &self.min,
            Aggr::Max => &self.max,
            Aggr::Counter => &self.counter,
        };
        slot.as_ref().ok_or_else(|| {
            TsdbError::ChunkNotFound(format!(
                "no {aggr} chunk in range [{}, {}]",
                self.min_time, self.max_time
            ))
        })
    }

    fn slot_mut(&mut self, aggr: Aggr) -> &mut Option<Chunk> {
        match aggr {
            Aggr::Raw => &mut self.raw,
            Aggr::Count => &mut self.count,
            Aggr::Sum => &mut self.sum,
            Aggr::Min => &mut self.min,
            Aggr::Max => &mut self.max,
            Aggr::Counter => &mut self.counter,
        }
    }

    /// Two chunks are exact duplicates when every field, time range and payloads
    /// included, is identical.
    pub fn is_exact_duplicate(&self, other: &AggrChunk) -> bool {
        self == other
    }

    pub fn overlaps(&self, start_ts: Timestamp, end_ts: Timestamp) -> bool {
        self.min_time <= end_ts && self.max_time >= start_ts
    }
}
