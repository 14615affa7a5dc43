//! Scribe library crate
//!
//! Exposes the core modules so benchmarks and tests can drive the tree,
//! the prompt pipeline and the renderer without starting a terminal.

pub mod ai;
pub mod app;
pub mod config;
pub mod files;
pub mod logging;
pub mod pipeline;
pub mod session;
pub mod surface;
pub mod tree;
pub mod ui;
pub mod util;
