//! Utility functions shared by the CLI and the payload reader.
//!
//! - [`app_data`] - Configuration file in the platform config directory
//! - [`encoding`] - Doxygen id and HTML entity decoding

pub mod app_data;
pub mod encoding;

pub use app_data::*;
pub use encoding::*;
