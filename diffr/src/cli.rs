use std::path::PathBuf;

use clap::Parser;

/// diffr - browse a repository's history one commit and one file at a time.
///
/// Pick a commit, pick one of the files it touched, and read the diff
/// rendered through your pager (delta by default).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Name to greet; only recorded in the log
    #[arg(long)]
    pub name: Option<String>,

    /// Repository to open (any path inside the work tree)
    #[arg(short = 'C', long = "repo", default_value = ".")]
    pub repo: PathBuf,

    /// Pager the diff is piped through; an empty string disables paging
    #[arg(long)]
    pub pager: Option<String>,

    /// Colour theme: "dark" or "catppuccin-mocha"
    #[arg(long)]
    pub theme: Option<String>,
}
