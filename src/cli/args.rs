//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::RenderStyle;

/// Minimal add/remove edit scripts between rooted integer trees
#[derive(Parser, Debug)]
#[command(name = "treediff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the edit script turning the first tree into the second
    Diff {
        /// Edge list of the source tree, e.g. [1,2][1,3]
        #[arg(value_hint = ValueHint::FilePath)]
        first: PathBuf,
        /// Edge list of the target tree
        #[arg(value_hint = ValueHint::FilePath)]
        second: PathBuf,
        /// Separator between steps (default from config)
        #[arg(long)]
        delimiter: Option<String>,
        /// Print the script as JSON
        #[arg(long, conflicts_with = "delimiter")]
        json: bool,
    },

    /// Edit a tree interactively: ADD(p,c), REMOVE(n), SAVE <path>, EXIT
    Session {
        /// Saved tree (JSON) to start from
        #[arg(long, value_hint = ValueHint::FilePath)]
        tree_path: Option<PathBuf>,
    },

    /// Show the tree stored in an edge-list file
    Render {
        /// Edge list file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Rendering (default from config)
        #[arg(long, value_enum)]
        style: Option<RenderStyle>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create global config template
    Init,
}
