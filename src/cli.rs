use clap::Parser;
use std::path::PathBuf;

/// git-vuln-miner: mine repositories for keyword-matched commits and scan the extracted changes
#[derive(Parser, Debug)]
#[command(
    name = "git-vuln-miner",
    about,
    long_about = None,
    disable_version_flag = true
)]
pub struct Cli {
    /// path to the file containing repository URLs, one per line
    #[arg(long, default_value = "repositories.txt")]
    pub input_file: PathBuf,

    /// keywords to search for in commit messages
    #[arg(long, num_args = 1.., required = true)]
    pub keywords: Vec<String>,

    /// directory extracted commits are written to
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// directory repositories are cloned into
    #[arg(long, default_value = "clones")]
    pub clones_dir: PathBuf,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
