/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;
