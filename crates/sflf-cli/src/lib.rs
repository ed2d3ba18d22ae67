//! Library side of the `sflf` command line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
