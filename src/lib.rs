//! orgchart: employee tables to reporting-line and organization hierarchies
//!
//! Layers:
//! - `domain`: classification, tree building, search and summaries (no I/O)
//! - `application`: table normalization and the chart service
//! - `infrastructure`: table readers and service wiring
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
