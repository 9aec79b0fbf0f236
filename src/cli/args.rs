//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Grow full binary trees, lay them out depth-first and render them
#[derive(Parser, Debug)]
#[command(name = "bintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .bintree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// How many nodes to grow.
#[derive(Args, Debug, Clone, Default)]
pub struct SizeArgs {
    /// Nodes to add to the implicit root
    #[arg(conflicts_with = "seed")]
    pub nodes: Option<usize>,

    /// Derive the node count from a string, e.g. an email address
    #[arg(short, long)]
    pub seed: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grow a tree and summarise it
    Build {
        #[command(flatten)]
        size: SizeArgs,
    },

    /// Print every node's coordinates in traversal order
    Layout {
        #[command(flatten)]
        size: SizeArgs,
    },

    /// Show the tree in the terminal
    Tree {
        #[command(flatten)]
        size: SizeArgs,
    },

    /// Write the tree as SVG
    Render {
        #[command(flatten)]
        size: SizeArgs,
        /// Output file (default: `output` from config)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
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

    /// Print config template
    Init,

    /// Show config paths
    Path,
}
