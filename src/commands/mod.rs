pub mod check;
pub mod install;
pub mod list;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::Log;
use crate::manifest::Manifest;

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates manifest path resolution and loading so that each command
/// does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

impl CommandSetup {
    /// Resolve the manifest path and load the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest path cannot be determined or the
    /// manifest fails to load or validate. A validation error is fatal by
    /// design: nothing is installed from a manifest that cannot be fully
    /// understood.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let manifest_path = resolve_manifest_path(global)?;

        log.stage("Loading manifest");
        let manifest = Manifest::load(&manifest_path)?;
        log.info(&format!(
            "loaded {} ecosystems, {} packages from {}",
            manifest.ecosystems.len(),
            manifest.package_count(),
            manifest_path.display()
        ));
        for list in &manifest.ecosystems {
            log.debug(&format!("{}: {} packages", list.name, list.packages.len()));
        }

        Ok(Self {
            manifest_path,
            manifest,
        })
    }
}

/// Resolve the manifest path from CLI arguments, environment, or the
/// current directory.
///
/// # Errors
///
/// Returns an error if no candidate path points at an existing file.
pub fn resolve_manifest_path(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref path) = global.manifest {
        return Ok(path.clone());
    }

    if let Ok(path) = std::env::var("PROVISION_MANIFEST") {
        return Ok(PathBuf::from(path));
    }

    let default = std::env::current_dir()?.join("manifest.toml");
    if default.exists() {
        return Ok(default);
    }

    anyhow::bail!(
        "cannot find manifest.toml in the current directory. Use --manifest or set PROVISION_MANIFEST"
    );
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolve_uses_explicit_flag() {
        let global = GlobalOpts {
            manifest: Some(PathBuf::from("/explicit/manifest.toml")),
            dry_run: false,
            parallel: false,
        };
        let path = resolve_manifest_path(&global).unwrap();
        assert_eq!(path, PathBuf::from("/explicit/manifest.toml"));
    }

    #[test]
    fn explicit_flag_wins_even_if_missing_on_disk() {
        // Existence is checked at load time, so errors point at the file
        // the user actually asked for.
        let global = GlobalOpts {
            manifest: Some(PathBuf::from("/does/not/exist.toml")),
            dry_run: false,
            parallel: false,
        };
        assert!(resolve_manifest_path(&global).is_ok());
    }
}
