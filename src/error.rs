use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
/// Enum for various errors raised while merging series sets.
pub enum TsdbError {
  #[error("Upstream series set failed. {0}")]
  Upstream(String),

  #[error("Invalid labels. {0}")]
  InvalidLabels(String),

  #[error("Chunk not found. {0}")]
  ChunkNotFound(String),

  #[error("Invalid chunk encoding. {0}")]
  InvalidEncoding(String),

  #[error("{0}")]
  General(String)
}

pub type TsdbResult<T> = Result<T, TsdbError>;
