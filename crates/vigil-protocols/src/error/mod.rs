//! Error types for the Vigil protocol layer.

mod extension;
mod monitor;

pub use extension::*;
pub use monitor::*;
