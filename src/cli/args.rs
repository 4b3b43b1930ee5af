//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::application::ScriptFormat;

/// Build presentation trees from scripts and reveal them step by step
#[derive(Parser, Debug)]
#[command(name = "steptree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the fully revealed tree of a script
    Show {
        /// Script file
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
        /// Script format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Commands)]
        format: FormatArg,
        /// Show how each node is anchored
        #[arg(long)]
        placement: bool,
    },

    /// Step through a script
    Play {
        /// Script file
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
        /// Script format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Commands)]
        format: FormatArg,
        /// Steps to take before printing
        #[arg(short, long, default_value_t = 0)]
        steps: usize,
        /// Read actions (next, prev, view, hide, destroy, quit) from stdin
        #[arg(short, long)]
        interactive: bool,
        /// Render hidden nodes as placeholders
        #[arg(long)]
        show_hidden: bool,
        /// Show how each node is anchored
        #[arg(long)]
        placement: bool,
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
    /// Print effective settings as TOML
    Show {
        /// Directory whose .steptree.toml is merged in
        #[arg(value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },
    /// Print the global config file location
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// `node <title>` / `end` lines
    Commands,
    /// Indented outline
    Outline,
}

impl From<FormatArg> for ScriptFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Commands => ScriptFormat::Commands,
            FormatArg::Outline => ScriptFormat::Outline,
        }
    }
}
