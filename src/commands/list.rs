use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::Log;

use super::CommandSetup;

/// Print the active manifest: every ecosystem and its entries in declared
/// order. Commented-out manifest entries never reach the model, so they do
/// not appear here.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded.
pub fn run(global: &GlobalOpts, log: &dyn Log) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    for list in &setup.manifest.ecosystems {
        log.stage(&format!("{} ({} packages)", list.name, list.packages.len()));
        for spec in &list.packages {
            log.info(&spec.to_string());
        }
    }

    Ok(())
}
