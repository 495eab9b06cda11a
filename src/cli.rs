use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the provisioning engine.
#[derive(Parser, Debug)]
#[command(
    name = "provision",
    about = "Declarative multi-ecosystem package provisioning engine",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Path to the package manifest (default: ./manifest.toml)
    #[arg(short, long, global = true)]
    pub manifest: Option<std::path::PathBuf>,

    /// Preview changes without installing anything
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Process ecosystems concurrently (each list stays sequential)
    #[arg(long, global = true)]
    pub parallel: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install every manifest package that is not already present
    Install(InstallOpts),
    /// Report which manifest packages are missing, installing nothing
    Check(CheckOpts),
    /// Print the active manifest contents
    List,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Run only specific ecosystems
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip specific ecosystems
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Emit the final report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Options for the `check` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CheckOpts {
    /// Emit the final report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
