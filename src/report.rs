//! Rendering of ranking results.
//!
//! - [`chart`] - Horizontal bar charts of a top-k list as PNG files

pub mod chart;

pub use chart::{plot_path, render_top_results, truncate_title};
