//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dconf_core::DEFAULT_ROOT;
use dconf_store::DEFAULT_PROGRAM;

/// dconf-manager - Keep dconf settings in line with INI files
///
/// Compares the given files with the live dconf database and prints the
/// difference. Sections named in the files are managed: options missing
/// from the files are reset, differing ones are overwritten. A section
/// name starting with `-` excludes that subtree from management.
#[derive(Parser, Debug)]
#[command(name = "dconf-manager")]
#[command(author, version, about)]
pub struct Cli {
    /// INI files to load; later files override earlier ones
    #[arg(value_name = "CONFIG", required = true)]
    pub config: Vec<PathBuf>,

    /// All actions will be relative to this root
    #[arg(long, default_value = DEFAULT_ROOT, env = "DCONF_MANAGER_ROOT")]
    pub root: String,

    /// Apply the changes; if not passed, only show a diff
    #[arg(short, long)]
    pub apply: bool,

    /// Also print options that are not managed
    #[arg(short = 'i', long)]
    pub show_ignored: bool,

    /// dconf program to invoke
    #[arg(
        long,
        value_name = "PROGRAM",
        default_value = DEFAULT_PROGRAM,
        env = "DCONF_MANAGER_DCONF"
    )]
    pub dconf: PathBuf,

    /// When to color the diff markers
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Print the plan as JSON instead of diff lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Color mode for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal and the environment allows it
    Auto,
    Always,
    Never,
}
