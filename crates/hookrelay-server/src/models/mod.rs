//! hookrelay Data Models
//!
//! - Bridge: outcome of relaying one webhook
//! - Health: liveness probe body
//! - Error: JSON error body

mod bridge;
mod error;
mod health;

pub use bridge::*;
pub use error::*;
pub use health::*;
