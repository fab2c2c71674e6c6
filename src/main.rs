mod artifacts;
mod cli;
mod commits;
mod constants;
mod error;
mod git;
mod github;
mod pipeline;
mod repolist;
mod scan;
mod snapshot;
#[cfg(test)]
mod testutil;

use crate::repolist::RepoRef;
use anyhow::{Context, Result};
use log::{error, info, warn};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse_args();

    let urls = repolist::read_repository_list(&cli.input_file)
        .with_context(|| format!("failed to read {}", cli.input_file.display()))?;
    if urls.is_empty() {
        warn!("no repositories listed in {}", cli.input_file.display());
        return Ok(());
    }

    // strictly sequential: one repository is fully processed before the next
    for url in &urls {
        let repo = match RepoRef::parse(url) {
            Ok(repo) => repo,
            Err(e) => {
                error!("skipping repository: {e}");
                continue;
            }
        };

        info!("processing repository: {url}");
        match pipeline::process_repository(&repo, &cli.keywords, &cli.clones_dir, &cli.output_dir) {
            Ok(summary) => info!(
                "finished {}/{}: {} matched, {} extracted, {} skipped, {} failed",
                repo.owner,
                repo.name,
                summary.matched,
                summary.extracted,
                summary.skipped,
                summary.failed
            ),
            Err(e) => error!("abandoning repository {url}: {e}"),
        }
    }

    Ok(())
}
