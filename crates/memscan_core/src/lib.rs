//! memscan_core: Core utilities for the memscan instruction scanner.
//!
//! Provides text spans, line/column mapping, and the error types shared
//! across the scanner, evaluator, and CLI.

pub mod error;
pub mod text;

// Re-export commonly used types
pub use error::ScanError;
pub use text::{LineAndColumn, LineMap, TextSpan};
