//! # Domain Models
//!
//! Entities, configuration types and constants shared by every campus hub crate.
//! Data and small helpers only; no I/O lives here.

pub mod config;
pub mod constants;
pub mod models;
pub mod registry;
