//! CLI utilities for medfinder
//!
//! Provides shared CLI functionality:
//! - Text or JSON output selection
//! - Status messages and value formatting
//! - Spinners for backend calls

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{OutputFormat, Status};
