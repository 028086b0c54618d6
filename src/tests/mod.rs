pub(crate) mod generators;
pub(crate) mod utils;
