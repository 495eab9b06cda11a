use std::sync::Arc;

use anyhow::Result;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::driver::{self, CancelToken, RunOpts};
use crate::exec::SystemExecutor;
use crate::logging::Log;
use crate::registry::Registry;
use crate::report::Report;

use super::CommandSetup;

/// Run the install command.
///
/// Exit behavior: a malformed manifest aborts here with zero install
/// attempts; per-package failures and unknown ecosystems are collected into
/// the report and turned into a single error after the run completes, so the
/// process exits non-zero without losing the summary.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or any package result
/// is a failure.
pub fn run(
    global: &GlobalOpts,
    opts: &InstallOpts,
    log: &dyn Log,
    cancel: &CancelToken,
) -> Result<()> {
    let version = option_env!("PROVISION_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("provision {version}"));

    let mut setup = CommandSetup::init(global, log)?;
    setup.manifest.retain_ecosystems(&opts.only, &opts.skip);

    let registry = Registry::with_defaults(Arc::new(SystemExecutor));
    let run_opts = RunOpts {
        dry_run: global.dry_run,
        parallel: global.parallel,
    };

    let results = driver::run(&setup.manifest, &registry, &run_opts, log, cancel);
    let report = Report::summarize(&results);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        log.stage("Summary");
        for line in report.render().lines() {
            log.info(line);
        }
    }

    if cancel.is_cancelled() {
        log.warn("run cancelled before completion");
    }

    if !report.is_success() {
        anyhow::bail!("{} failure(s); see report above", report.failures.len());
    }
    Ok(())
}
