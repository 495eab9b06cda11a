use std::sync::Arc;

use anyhow::Result;

use crate::cli::{CheckOpts, GlobalOpts};
use crate::driver::{self, CancelToken, RunOpts};
use crate::exec::SystemExecutor;
use crate::logging::Log;
use crate::registry::Registry;
use crate::report::Report;

use super::CommandSetup;

/// Run the check command: a forced dry-run over the whole manifest.
///
/// Missing packages show up as `pending` in the report; nothing is installed.
/// The command fails only when a status query itself fails or an ecosystem
/// is unknown, not when packages are merely missing.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, a status query fails,
/// or the manifest names an unknown ecosystem.
pub fn run(
    global: &GlobalOpts,
    opts: &CheckOpts,
    log: &dyn Log,
    cancel: &CancelToken,
) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    let registry = Registry::with_defaults(Arc::new(SystemExecutor));
    let run_opts = RunOpts {
        dry_run: true,
        parallel: global.parallel,
    };

    let results = driver::run(&setup.manifest, &registry, &run_opts, log, cancel);
    let report = Report::summarize(&results);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        log.stage("Status");
        for line in report.render().lines() {
            log.info(line);
        }
    }

    if !report.is_success() {
        anyhow::bail!("{} check failure(s); see report above", report.failures.len());
    }
    Ok(())
}
