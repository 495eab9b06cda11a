//! Installer driver: walks the manifest and drives the adapters.
//!
//! Error recovery happens at two scopes and never aborts the run:
//!
//! - an unresolvable ecosystem yields exactly one [`Outcome::UnknownEcosystem`]
//!   result for the whole list and the driver moves on;
//! - a single package's failure is recorded as [`Outcome::Failed`] and later
//!   packages in the same list still run.
//!
//! Ecosystem lists run sequentially by default. With `parallel` enabled,
//! ecosystems run concurrently but each list stays strictly sequential
//! internally: package managers serialize their own database mutations and
//! concurrent invocations of the same manager can corrupt its lock state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::adapters::Adapter;
use crate::logging::Log;
use crate::manifest::{EcosystemList, Manifest, PackageSpec};
use crate::registry::Registry;

/// Cooperative cancellation flag, set by the Ctrl-C handler.
///
/// The driver honors cancellation at package boundaries only: the in-flight
/// item finishes and no further item starts.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Request cancellation. Safe to call from a signal handler thread.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Driver execution options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOpts {
    /// Preview mode: report what would be installed, run no install command.
    pub dry_run: bool,
    /// Run ecosystems concurrently (lists stay sequential internally).
    pub parallel: bool,
}

/// Outcome of processing one manifest entry (or one unresolvable list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The package was already installed; nothing was done.
    AlreadyPresent { package: String },
    /// The package was installed by this run.
    Installed { package: String },
    /// Dry-run: the package is missing and would have been installed.
    WouldInstall { package: String },
    /// The check or install step failed; later packages still ran.
    Failed { package: String, reason: String },
    /// No adapter is registered for the list's ecosystem. Emitted once per
    /// list, regardless of how many packages it declares.
    UnknownEcosystem,
}

/// Per-item result produced by the driver and consumed by the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    /// Ecosystem the entry belongs to.
    pub ecosystem: String,
    /// What happened.
    pub outcome: Outcome,
}

/// Process every ecosystem list in manifest order, collecting one result per
/// package (and one per unresolvable list).
///
/// The manifest and registry are read-only for the duration of the run; all
/// results are produced fresh and never persisted.
#[must_use]
pub fn run(
    manifest: &Manifest,
    registry: &Registry,
    opts: &RunOpts,
    log: &dyn Log,
    cancel: &CancelToken,
) -> Vec<InstallResult> {
    let per_ecosystem: Vec<Vec<InstallResult>> = if opts.parallel {
        manifest
            .ecosystems
            .par_iter()
            .map(|list| run_ecosystem(list, registry, opts, log, cancel))
            .collect()
    } else {
        manifest
            .ecosystems
            .iter()
            .map(|list| run_ecosystem(list, registry, opts, log, cancel))
            .collect()
    };

    per_ecosystem.into_iter().flatten().collect()
}

/// Process a single ecosystem list in declared order.
fn run_ecosystem(
    list: &EcosystemList,
    registry: &Registry,
    opts: &RunOpts,
    log: &dyn Log,
    cancel: &CancelToken,
) -> Vec<InstallResult> {
    if cancel.is_cancelled() {
        return Vec::new();
    }

    let adapter = match registry.resolve(&list.name) {
        Ok(adapter) => adapter,
        Err(e) => {
            log.warn(&format!("{e}; skipping {} package(s)", list.packages.len()));
            return vec![InstallResult {
                ecosystem: list.name.clone(),
                outcome: Outcome::UnknownEcosystem,
            }];
        }
    };

    log.stage(&format!("{} ({} packages)", list.name, list.packages.len()));

    let mut results = Vec::with_capacity(list.packages.len());
    for spec in &list.packages {
        if cancel.is_cancelled() {
            log.warn(&format!(
                "cancelled; stopping {} before '{}'",
                list.name, spec.name
            ));
            break;
        }
        results.push(InstallResult {
            ecosystem: list.name.clone(),
            outcome: run_one(adapter, spec, opts, log),
        });
    }
    results
}

/// Check-then-install a single package.
fn run_one(adapter: &dyn Adapter, spec: &PackageSpec, opts: &RunOpts, log: &dyn Log) -> Outcome {
    match adapter.check_installed(spec) {
        Ok(true) => {
            log.debug(&format!("{}: already installed", spec.name));
            Outcome::AlreadyPresent {
                package: spec.name.clone(),
            }
        }
        Ok(false) if opts.dry_run => {
            log.dry_run(&format!("would install {spec}"));
            Outcome::WouldInstall {
                package: spec.name.clone(),
            }
        }
        Ok(false) => match adapter.install(spec) {
            Ok(()) => {
                log.info(&format!("installed {spec}"));
                Outcome::Installed {
                    package: spec.name.clone(),
                }
            }
            Err(e) => {
                log.error(&format!("{}: {e:#}", spec.name));
                Outcome::Failed {
                    package: spec.name.clone(),
                    reason: format!("{e:#}"),
                }
            }
        },
        Err(e) => {
            log.error(&format!("{}: {e:#}", spec.name));
            Outcome::Failed {
                package: spec.name.clone(),
                reason: format!("{e:#}"),
            }
        }
    }
}
