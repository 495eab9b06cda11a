//! Run summary aggregation and rendering.

use serde::Serialize;

use crate::driver::{InstallResult, Outcome};

/// Per-ecosystem outcome counts.
#[derive(Debug, Clone, Serialize)]
pub struct EcosystemSummary {
    /// Ecosystem name.
    pub ecosystem: String,
    /// Packages installed by this run.
    pub installed: u32,
    /// Packages that were already present.
    pub present: u32,
    /// Packages a dry-run would have installed.
    pub pending: u32,
    /// Packages whose check or install failed.
    pub failed: u32,
    /// Whether the whole list was skipped because no adapter is registered.
    pub unknown: bool,
}

impl EcosystemSummary {
    fn new(ecosystem: &str) -> Self {
        Self {
            ecosystem: ecosystem.to_string(),
            installed: 0,
            present: 0,
            pending: 0,
            failed: 0,
            unknown: false,
        }
    }
}

/// One surfaced failure: a failed package or an unresolvable ecosystem.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    /// Ecosystem the failure belongs to.
    pub ecosystem: String,
    /// Failed package identifier; `None` for an unknown-ecosystem failure.
    pub package: Option<String>,
    /// Human-readable reason.
    pub reason: String,
}

/// Aggregated view of a driver run.
///
/// Pure function of the result sequence; no side effects beyond producing
/// text/structure.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Summaries in first-seen (manifest) order.
    pub ecosystems: Vec<EcosystemSummary>,
    /// Every failure, in result order. Non-empty iff the run failed.
    pub failures: Vec<Failure>,
}

impl Report {
    /// Group results by ecosystem and count each outcome kind.
    #[must_use]
    pub fn summarize(results: &[InstallResult]) -> Self {
        let mut ecosystems: Vec<EcosystemSummary> = Vec::new();
        let mut failures = Vec::new();

        for result in results {
            let pos = ecosystems
                .iter()
                .position(|s| s.ecosystem == result.ecosystem)
                .unwrap_or_else(|| {
                    ecosystems.push(EcosystemSummary::new(&result.ecosystem));
                    ecosystems.len() - 1
                });
            let Some(summary) = ecosystems.get_mut(pos) else {
                continue;
            };

            match &result.outcome {
                Outcome::Installed { .. } => summary.installed += 1,
                Outcome::AlreadyPresent { .. } => summary.present += 1,
                Outcome::WouldInstall { .. } => summary.pending += 1,
                Outcome::Failed { package, reason } => {
                    summary.failed += 1;
                    failures.push(Failure {
                        ecosystem: result.ecosystem.clone(),
                        package: Some(package.clone()),
                        reason: reason.clone(),
                    });
                }
                Outcome::UnknownEcosystem => {
                    summary.unknown = true;
                    failures.push(Failure {
                        ecosystem: result.ecosystem.clone(),
                        package: None,
                        reason: "no adapter registered for this ecosystem".to_string(),
                    });
                }
            }
        }

        Self {
            ecosystems,
            failures,
        }
    }

    /// Whether the run completed without failures or unknown ecosystems.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Render the human-readable tally, one line per ecosystem followed by
    /// the failure list.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        for summary in &self.ecosystems {
            if summary.unknown {
                out.push_str(&format!("{}: unknown ecosystem\n", summary.ecosystem));
                continue;
            }
            out.push_str(&format!(
                "{}: {} installed, {} present, {} pending, {} failed\n",
                summary.ecosystem,
                summary.installed,
                summary.present,
                summary.pending,
                summary.failed
            ));
        }

        let (installed, present, pending, failed) = self.totals();
        out.push_str(&format!(
            "total: {installed} installed, {present} present, {pending} pending, {failed} failed\n"
        ));

        if !self.failures.is_empty() {
            out.push_str("failures:\n");
            for failure in &self.failures {
                match &failure.package {
                    Some(package) => out.push_str(&format!(
                        "  {}/{}: {}\n",
                        failure.ecosystem, package, failure.reason
                    )),
                    None => out.push_str(&format!(
                        "  {}: {}\n",
                        failure.ecosystem, failure.reason
                    )),
                }
            }
        }

        out
    }

    fn totals(&self) -> (u32, u32, u32, u32) {
        self.ecosystems.iter().fold((0, 0, 0, 0), |acc, s| {
            (
                acc.0 + s.installed,
                acc.1 + s.present,
                acc.2 + s.pending,
                acc.3 + s.failed,
            )
        })
    }
}
