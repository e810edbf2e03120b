//! # CLI Layer
//!
//! The admin command line: a thin client of the [`folio::api`] facade.
//!
//! - `setup.rs`: clap argument definitions
//! - `commands.rs`: dispatch, one `handle_*` per command
//! - `render.rs` + `templates/`: terminal output
//!
//! This layer is the only place that prints or decides the exit code. The
//! `serve` command hands the loaded context to the web layer.

pub mod commands;
pub mod render;
pub mod setup;
mod templates;
