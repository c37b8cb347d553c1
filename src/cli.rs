//! Command line interface for newsrank.

pub mod args;
pub mod commands;
pub mod output;

pub use args::*;
pub use commands::*;
