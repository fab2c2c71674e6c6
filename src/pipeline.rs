use crate::commits::{self, CommitRecord};
use crate::error::MinerError;
use crate::git::WorkingCopy;
use crate::github;
use crate::repolist::RepoRef;
use crate::{artifacts, scan, snapshot};
use log::{error, info, warn};
use std::fs;
use std::path::Path;

/// per-repository accounting reported after the working copy is cleaned up
#[derive(Debug, Default)]
pub struct RepoSummary {
    pub matched: usize,
    pub extracted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// what happened to one matched commit
enum CommitOutcome {
    Extracted,
    /// root commit: no parent to diff against, nothing to extract
    NoParent,
}

/// process one repository end to end: clone, list commits, select matches,
/// run the per-commit sub-pipeline for each, then remove the working copy
///
/// only the clone failure propagates (abandoning this repository); a failure
/// inside one commit's sub-pipeline is logged and the next match proceeds.
/// the working copy is removed whether or not individual commits failed
pub fn process_repository(
    repo: &RepoRef,
    keywords: &[String],
    clones_dir: &Path,
    output_dir: &Path,
) -> Result<RepoSummary, MinerError> {
    let clone_dir = clones_dir.join(&repo.name);
    if clone_dir.exists() {
        // leftover from an interrupted earlier run; clone refuses to overwrite
        fs::remove_dir_all(&clone_dir)?;
    }

    let working_copy = WorkingCopy::clone_from(&repo.url, &clone_dir)?;

    let all_commits = github::list_commits(repo);
    let matching = commits::select_matching(&all_commits, keywords);

    let mut summary = RepoSummary {
        matched: matching.len(),
        ..RepoSummary::default()
    };

    let repo_output = output_dir.join(&repo.name);
    for commit in &matching {
        match process_commit(&working_copy, commit, &repo_output) {
            Ok(CommitOutcome::Extracted) => summary.extracted += 1,
            Ok(CommitOutcome::NoParent) => summary.skipped += 1,
            Err(e) => {
                error!(
                    "failed to process commit {} of {}/{}: {e}",
                    commit.sha, repo.owner, repo.name
                );
                summary.failed += 1;
            }
        }
    }

    if let Err(e) = working_copy.remove() {
        warn!("failed to remove working copy of {}/{}: {e}", repo.owner, repo.name);
    }

    Ok(summary)
}

/// the per-commit sub-pipeline: resolve parent, compute the changed-file set
/// once, extract both snapshots, write diff and patch, scan
///
/// the output folder is created only after the parent resolves, so a root
/// commit leaves nothing behind. A scan failure is absorbed here: the commit
/// still counts as extracted, with the findings file absent
fn process_commit(
    working_copy: &WorkingCopy,
    commit: &CommitRecord,
    repo_output: &Path,
) -> Result<CommitOutcome, MinerError> {
    let sha = &commit.sha;

    let Some(parent) = working_copy.resolve_parent(sha)? else {
        info!("commit {sha} has no parent, skipping extraction");
        return Ok(CommitOutcome::NoParent);
    };

    // one list drives both snapshot directions
    let changed_files = working_copy.changed_files(&parent, sha)?;
    info!("commit {sha}: {} changed files", changed_files.len());

    let out_dir = repo_output.join(sha);
    fs::create_dir_all(&out_dir)?;

    let extraction = snapshot::extract(working_copy, &changed_files, &parent, sha, &out_dir)?;
    info!(
        "extracted commit {sha}: {} files copied, {} missing",
        extraction.copied, extraction.missing
    );

    artifacts::write_diff_and_patch(working_copy, &parent, sha, &out_dir)?;

    match scan::scan(&out_dir) {
        Ok(outcome) => info!("scan of commit {sha} found {} findings", outcome.findings),
        Err(e) => error!("scan failed for commit {sha}: {e}"),
    }

    Ok(CommitOutcome::Extracted)
}
