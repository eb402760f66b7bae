//! # folio
//!
//! The Folio application: HTTP API, CLI and configuration around the
//! `folio-core` engine. The binary in `main.rs` is a thin entry point over
//! this library, which integration tests drive directly.

pub mod api;
pub mod cli;
pub mod config;
