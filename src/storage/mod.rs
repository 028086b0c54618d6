mod chunk;
mod series;

pub use chunk::*;
pub use series::*;
