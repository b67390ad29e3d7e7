//! This module collects functionality for observing the resources
//! consumed by column storage.

/// Module for defining [ByteSized]
pub mod bytesized;
pub use bytesized::ByteSized;
