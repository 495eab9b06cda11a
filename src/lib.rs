//! Declarative package provisioning engine.
//!
//! Consumes a TOML manifest of package identifiers grouped by ecosystem
//! (brew formulas, casks, gems, global npm packages, Mac App Store product
//! IDs) and drives one adapter per ecosystem to check and install each entry,
//! then reports a per-ecosystem summary.
//!
//! The public API is organised into five layers:
//!
//! - **[`manifest`]** — parse and validate the manifest document
//! - **[`adapters`]** — per-ecosystem check/install capabilities
//! - **[`registry`]** — ecosystem name → adapter lookup
//! - **[`driver`]** — walk the manifest, collect one result per entry
//! - **[`report`]** — aggregate results into the final summary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod driver;
pub mod error;
pub mod exec;
pub mod logging;
pub mod manifest;
pub mod registry;
pub mod report;
