//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with the outside world (upstream payloads, delivery, time).
//!
//! Implementations of these traits live in the integration and server crates.

pub mod clock;
pub mod transformer;
pub mod webhook;

// Re-exports
pub use clock::*;
pub use transformer::*;
pub use webhook::*;
