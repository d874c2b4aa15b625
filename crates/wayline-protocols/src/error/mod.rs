//! Error types for the Wayline protocol layer.

mod bind;
mod execution;
mod payload;

pub use bind::*;
pub use execution::*;
pub use payload::*;
