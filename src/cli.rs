use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cmdgen")]
#[command(
    about = "Pick a package manager and framework, get the install command on your clipboard",
    long_about = None,
    version
)]
pub struct Cli {
    /// Dataset document to use instead of the configured or built-in one
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List platforms, package managers, frameworks and library groups
    List,
    /// Print the commands for a selection
    Show {
        /// Package manager name
        #[arg(long)]
        pm: String,

        /// Framework name (defaults to the manager's first framework)
        #[arg(short, long)]
        framework: Option<String>,

        /// Library choice as group=name; repeatable
        #[arg(short, long = "lib", value_name = "GROUP=NAME")]
        libs: Vec<String>,

        /// Copy the framework command to the clipboard
        #[arg(short, long)]
        copy: bool,
    },
    /// Choose a package manager and framework interactively
    Pick {
        /// Copy the resulting command to the clipboard
        #[arg(short, long)]
        copy: bool,
    },
    /// Check a dataset document and print a summary
    Validate {
        path: PathBuf,
    },
}
