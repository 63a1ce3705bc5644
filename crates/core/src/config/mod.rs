//! Configuration loading and schema definitions
//!
//! Settings for search, the pharmacy finder and logging, read from
//! `medfinder.toml`.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
