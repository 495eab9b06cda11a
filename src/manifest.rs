//! Package manifest loading and validation.
//!
//! The manifest is a TOML document whose top level is a table: each key names
//! an ecosystem (`brew`, `cask`, `gem`, `npm`, `mas`, …) and each value is an
//! array of `"identifier[ options...]"` strings. Disabled entries are simply
//! commented out by the manifest author and never reach the parsed model.
//! Document order is preserved and is the intended install order.

use std::fmt;
use std::path::Path;

use crate::error::ManifestError;

/// One manifest entry: a package identifier plus optional pass-through options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Package identifier (formula name, gem name, App Store product ID, …).
    pub name: String,
    /// Free-form option flags handed to the adapter verbatim.
    pub options: Vec<String>,
}

impl PackageSpec {
    /// Parse a manifest entry string. The first whitespace-separated token is
    /// the identifier; everything after it is kept as options.
    ///
    /// Returns `None` when the entry contains no identifier at all.
    #[must_use]
    pub fn parse(entry: &str) -> Option<Self> {
        let mut tokens = entry.split_whitespace();
        let name = tokens.next()?.to_string();
        Some(Self {
            name,
            options: tokens.map(String::from).collect(),
        })
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for opt in &self.options {
            write!(f, " {opt}")?;
        }
        Ok(())
    }
}

/// An ordered list of packages for a single ecosystem.
#[derive(Debug, Clone)]
pub struct EcosystemList {
    /// Ecosystem name as written in the manifest.
    pub name: String,
    /// Packages in declared order.
    pub packages: Vec<PackageSpec>,
}

/// The full set of ecosystem → package-list declarations.
///
/// Loaded once per run and owned read-only by the driver; nothing mutates it
/// after load (the `--only`/`--skip` filter runs before the driver starts).
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Ecosystem lists in document order.
    pub ecosystems: Vec<EcosystemList>,
}

impl Manifest {
    /// Load and validate a manifest file.
    ///
    /// # Errors
    ///
    /// Returns a [`ManifestError`] if the file cannot be read or fails
    /// validation. Any such error is fatal: no install is attempted.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Parse manifest text. `origin` labels the document in error messages.
    ///
    /// Ecosystem name uniqueness is enforced by the TOML parser itself:
    /// duplicate top-level keys are a syntax error.
    ///
    /// # Errors
    ///
    /// Returns a [`ManifestError`] if the text is not valid TOML, an ecosystem
    /// value is not an array of strings, or an identifier is empty.
    pub fn parse(text: &str, origin: &str) -> Result<Self, ManifestError> {
        let table: toml::Table = text.parse().map_err(|e: toml::de::Error| {
            ManifestError::Syntax {
                path: origin.to_string(),
                message: e.message().to_string(),
            }
        })?;

        let mut ecosystems = Vec::with_capacity(table.len());
        for (name, value) in table {
            let items = value.as_array().ok_or_else(|| ManifestError::NotAList {
                ecosystem: name.clone(),
            })?;

            let mut packages = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let entry = item.as_str().ok_or_else(|| ManifestError::NotAString {
                    ecosystem: name.clone(),
                    index,
                })?;
                let spec =
                    PackageSpec::parse(entry).ok_or_else(|| ManifestError::EmptyIdentifier {
                        ecosystem: name.clone(),
                        index,
                    })?;
                packages.push(spec);
            }

            ecosystems.push(EcosystemList { name, packages });
        }

        Ok(Self { ecosystems })
    }

    /// Total number of package specs across all ecosystems.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.ecosystems.iter().map(|e| e.packages.len()).sum()
    }

    /// Apply `--only` / `--skip` ecosystem filters.
    ///
    /// When `only` is non-empty it wins and `skip` is ignored, mirroring the
    /// CLI contract. Matching is case-insensitive on the ecosystem name.
    pub fn retain_ecosystems(&mut self, only: &[String], skip: &[String]) {
        if !only.is_empty() {
            self.ecosystems
                .retain(|e| only.iter().any(|o| o.eq_ignore_ascii_case(&e.name)));
        } else if !skip.is_empty() {
            self.ecosystems
                .retain(|e| !skip.iter().any(|s| s.eq_ignore_ascii_case(&e.name)));
        }
    }
}
