//! Domain Services
//!
//! Stateless helpers shared by every transformer.

pub mod formatting;

pub use formatting::*;
