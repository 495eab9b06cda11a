//! Domain-specific error types for the provisioning engine.
//!
//! Internal modules return typed errors ([`ManifestError`], [`RegistryError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! Propagation policy:
//!
//! - [`ManifestError`] is fatal and aborts the run before any install attempt.
//! - [`RegistryError::UnknownEcosystem`] is recovered per ecosystem list: the
//!   driver records one result for the whole list and moves on.
//! - Per-package install failures never become `Err` at the driver level;
//!   they are captured as `Failed` outcomes and surfaced in the final report.

use thiserror::Error;

/// Errors that arise while loading and validating the package manifest.
///
/// Any of these aborts the whole run: a manifest that cannot be fully
/// understood must not trigger a partial install.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// An I/O error occurred while reading the manifest file.
    #[error("IO error reading manifest {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest is not valid TOML.
    #[error("Invalid TOML in {path}: {message}")]
    Syntax { path: String, message: String },

    /// An ecosystem value is not an array of package strings.
    #[error("Ecosystem '{ecosystem}' is not a list of package strings")]
    NotAList { ecosystem: String },

    /// An element of an ecosystem list is not a string.
    #[error("Ecosystem '{ecosystem}' entry {index} is not a string")]
    NotAString { ecosystem: String, index: usize },

    /// An ecosystem list entry has no package identifier.
    #[error("Ecosystem '{ecosystem}' entry {index} has an empty package identifier")]
    EmptyIdentifier { ecosystem: String, index: usize },
}

/// Errors that arise from adapter lookup.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No adapter is registered under the requested ecosystem name.
    #[error("No adapter registered for ecosystem '{0}'")]
    UnknownEcosystem(String),
}
