//! ESG ratings dashboard: a fixed set of company scores, a per-company mean
//! with a letter grade, and a terminal dashboard that charts both.

pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod logging;
pub mod output;
pub mod rating;
pub mod stderr_buffer;
pub mod tui;
