use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "ppm",
    about = "Panoramic package manager",
    long_about = "One interface for npm, pip and scoop: search every available \
                  package manager at once, then install, update or remove through \
                  the right one.",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Kill backend commands running longer than SECS (default: wait)
    #[arg(long, value_name = "SECS", global = true, env = "PPM_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Backends to use, in priority order (e.g. "pip,npm")
    #[arg(long, value_name = "IDS", global = true, env = "PPM_BACKENDS")]
    pub backends: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install a package using the first package manager that can
    Install {
        /// Package name
        package: String,

        /// Install with this package manager only (npm, pip, scoop)
        #[arg(short = 'b', long, value_name = "ID")]
        backend: Option<String>,
    },

    /// Search every available package manager, then pick one to install
    Search {
        /// Search query
        query: String,

        /// Print ranked results as JSON instead of prompting
        #[arg(long)]
        json: bool,
    },

    /// Update a package, or everything when no package is given
    Update {
        /// Package name (omit to update all packages)
        package: Option<String>,

        /// Update through this package manager only
        #[arg(short = 'b', long, value_name = "ID")]
        backend: Option<String>,
    },

    /// Remove a package
    Remove {
        /// Package name
        package: String,

        /// Remove through this package manager only
        #[arg(short = 'b', long, value_name = "ID")]
        backend: Option<String>,
    },

    /// List package managers and whether they are available here
    Backends,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
