//! Error types

mod config;
mod conversion;

pub use config::*;
pub use conversion::*;
