//! Per-ecosystem install adapters.
//!
//! Each ecosystem is served by one adapter for the lifetime of the process.
//! The real adapters are thin shell-outs to the underlying package manager;
//! everything runs through the injected [`Executor`] so tests never spawn
//! real processes.

use std::sync::Arc;

use anyhow::Result;

use crate::exec::Executor;
use crate::manifest::PackageSpec;

/// The per-ecosystem capability that checks/installs a single package.
pub trait Adapter: std::fmt::Debug + Send + Sync {
    /// Ecosystem name this adapter serves (registry lookup key).
    fn ecosystem(&self) -> &str;

    /// Whether the package is already present on the host.
    ///
    /// # Errors
    ///
    /// Returns an error if the query command cannot be executed at all.
    fn check_installed(&self, spec: &PackageSpec) -> Result<bool>;

    /// Install the package, passing any option flags through verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the install command fails or exits non-zero.
    fn install(&self, spec: &PackageSpec) -> Result<()>;
}

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manager {
    /// Homebrew formulas.
    Brew,
    /// Homebrew GUI application casks.
    Cask,
    /// Ruby gems.
    Gem,
    /// Global npm packages.
    Npm,
    /// Mac App Store products (via the `mas` CLI, looked up by product ID).
    Mas,
}

impl Manager {
    /// All managers with built-in adapters, in default registration order.
    pub const ALL: [Self; 5] = [Self::Brew, Self::Cask, Self::Gem, Self::Npm, Self::Mas];

    /// The executable this manager shells out to. Casks go through `brew`.
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Brew | Self::Cask => "brew",
            Self::Gem => "gem",
            Self::Npm => "npm",
            Self::Mas => "mas",
        }
    }
}

impl std::fmt::Display for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brew => write!(f, "brew"),
            Self::Cask => write!(f, "cask"),
            Self::Gem => write!(f, "gem"),
            Self::Npm => write!(f, "npm"),
            Self::Mas => write!(f, "mas"),
        }
    }
}

/// [`Adapter`] that shells out to a package manager through an [`Executor`].
pub struct ShellAdapter {
    manager: Manager,
    ecosystem: String,
    executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for ShellAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellAdapter")
            .field("manager", &self.manager)
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

impl ShellAdapter {
    /// Create an adapter for the given manager.
    #[must_use]
    pub fn new(manager: Manager, executor: Arc<dyn Executor>) -> Self {
        Self {
            manager,
            ecosystem: manager.to_string(),
            executor,
        }
    }

    /// Build the argument vector `prefix ++ [name] ++ options`.
    fn args_with_options<'a>(prefix: &[&'a str], spec: &'a PackageSpec) -> Vec<&'a str> {
        let mut args: Vec<&str> = prefix.to_vec();
        args.push(spec.name.as_str());
        args.extend(spec.options.iter().map(String::as_str));
        args
    }
}

impl Adapter for ShellAdapter {
    fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    fn check_installed(&self, spec: &PackageSpec) -> Result<bool> {
        let program = self.manager.program();
        if !self.executor.which(program) {
            anyhow::bail!("{program} not found on PATH");
        }
        match self.manager {
            Manager::Brew => {
                // Exits 0 with "name version…" on stdout when installed.
                let result = self
                    .executor
                    .run_unchecked("brew", &["list", "--versions", &spec.name])?;
                Ok(result.success && !result.stdout.trim().is_empty())
            }
            Manager::Cask => {
                let result = self.executor.run_unchecked(
                    "brew",
                    &["list", "--cask", "--versions", &spec.name],
                )?;
                Ok(result.success && !result.stdout.trim().is_empty())
            }
            Manager::Gem => {
                // `gem list -i` prints "true"/"false" and mirrors it in the
                // exit code.
                let result = self
                    .executor
                    .run_unchecked("gem", &["list", "-i", &spec.name])?;
                Ok(result.success && result.stdout.trim() == "true")
            }
            Manager::Npm => {
                let result = self.executor.run_unchecked(
                    "npm",
                    &["ls", "--global", "--depth=0", &spec.name],
                )?;
                Ok(result.success)
            }
            Manager::Mas => {
                // `mas list` prints one "<product-id> <name> (<version>)" line
                // per installed app; match on the leading ID token.
                let result = self.executor.run_unchecked("mas", &["list"])?;
                Ok(result.success
                    && result.stdout.lines().any(|line| {
                        line.split_whitespace().next() == Some(spec.name.as_str())
                    }))
            }
        }
    }

    fn install(&self, spec: &PackageSpec) -> Result<()> {
        match self.manager {
            Manager::Brew => {
                self.executor
                    .run("brew", &Self::args_with_options(&["install"], spec))?;
            }
            Manager::Cask => {
                self.executor.run(
                    "brew",
                    &Self::args_with_options(&["install", "--cask"], spec),
                )?;
            }
            Manager::Gem => {
                self.executor
                    .run("gem", &Self::args_with_options(&["install"], spec))?;
            }
            Manager::Npm => {
                self.executor.run(
                    "npm",
                    &Self::args_with_options(&["install", "--global"], spec),
                )?;
            }
            Manager::Mas => {
                self.executor
                    .run("mas", &Self::args_with_options(&["install"], spec))?;
            }
        }
        Ok(())
    }
}
