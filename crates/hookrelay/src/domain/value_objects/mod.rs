//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod date_style;
mod source;

pub use date_style::*;
pub use source::*;
