use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use provision_cli::cli;
use provision_cli::commands;
use provision_cli::driver::CancelToken;
use provision_cli::logging::Logger;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let log = Logger::new(args.verbose);

    // Ctrl-C requests cancellation; the driver stops at the next package
    // boundary rather than killing an in-flight package manager.
    let cancel = CancelToken::default();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel())
            .context("failed to install Ctrl-C handler")?;
    }

    match args.command {
        cli::Command::Install(opts) => {
            commands::install::run(&args.global, &opts, &log, &cancel)
        }
        cli::Command::Check(opts) => commands::check::run(&args.global, &opts, &log, &cancel),
        cli::Command::List => commands::list::run(&args.global, &log),
        cli::Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut cli::Cli::command(),
                "provision",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
