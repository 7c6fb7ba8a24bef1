//! Infrastructure Adapters
//!
//! Implementations of domain ports backed by external systems.

mod webhook;

pub use webhook::HttpWebhookSender;
