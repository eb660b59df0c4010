use std::path::PathBuf;

use clap::Parser;

/// Shared command-line flags for both front-ends.
///
/// The interactive tool takes no positional arguments or subcommands:
/// everything it does is driven from the menu once it is running.
/// These flags only tune logging and configuration, and the web server
/// binary accepts the same set.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// increase the verbosity
    ///
    /// This flag can be used multiple times to increase the amount of information
    /// produced by hourbook
    #[arg(short, long, action = clap::ArgAction::Count, help_heading = "Logging")]
    pub verbose: u8,

    /// output no logging
    ///
    /// Setting quiet disables all logging to stderr.  Data will only be printed
    /// to stdout, and only for commands that output information as their main
    /// action.
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Logging")]
    pub quiet: bool,

    /// use a different configuration file
    ///
    /// By default, configuration is read from the platform's local
    /// configuration directory.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
