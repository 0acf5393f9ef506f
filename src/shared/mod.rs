/// Shared utilities used across all layers
pub mod error;
pub mod paths;
pub mod result;

pub use result::Result;
