use crate::error::MinerError;
use git2::{DiffFormat, Repository};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// a cloned, mutable checkout of one repository
///
/// owned exclusively by the pipeline while that repository is processed;
/// checkout operations mutate its HEAD and worktree, so no two operations
/// may run against the same working copy concurrently
pub struct WorkingCopy {
    path: PathBuf,
    repo: Repository,
}

impl WorkingCopy {
    /// clone a repository into `target_dir` and open it
    ///
    /// the caller must ensure `target_dir` does not already exist; the git
    /// binary is used rather than libgit2 so credential helpers and all
    /// transport protocols behave exactly as they do on the command line
    pub fn clone_from(url: &str, target_dir: &Path) -> Result<WorkingCopy, MinerError> {
        info!("cloning repository {url} into {}", target_dir.display());

        let output = Command::new("git")
            .arg("clone")
            .arg(url)
            .arg(target_dir)
            .output()
            .map_err(|e| MinerError::vcs("clone", e.to_string()))?;
        expect_success("clone", output)?;

        let repo = Repository::open(target_dir)?;
        Ok(WorkingCopy {
            path: target_dir.to_path_buf(),
            repo,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// switch HEAD and the worktree to `rev`
    pub fn checkout(&self, rev: &str) -> Result<(), MinerError> {
        info!("checking out {rev}");

        let output = self
            .git_command()
            .args(["checkout", rev])
            .output()
            .map_err(|e| MinerError::vcs("checkout", e.to_string()))?;
        expect_success("checkout", output)?;
        Ok(())
    }

    /// first parent of `rev`, or None for a root commit
    pub fn resolve_parent(&self, rev: &str) -> Result<Option<String>, MinerError> {
        let commit = self.repo.revparse_single(rev)?.peel_to_commit()?;
        if commit.parent_count() == 0 {
            return Ok(None);
        }
        Ok(Some(commit.parent_id(0)?.to_string()))
    }

    /// ordered, deduplicated relative paths differing between two revs
    ///
    /// both sides of each delta are collected, so a file deleted at `to`
    /// keeps its old path in the list and a rename contributes both paths
    pub fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>, MinerError> {
        let diff = self.tree_diff(from, to)?;

        let mut files: Vec<String> = Vec::new();
        for delta in diff.deltas() {
            for side in [delta.old_file(), delta.new_file()] {
                if let Some(path) = side.path() {
                    let path = path.to_string_lossy().to_string();
                    if !files.contains(&path) {
                        files.push(path);
                    }
                }
            }
        }
        Ok(files)
    }

    /// unified diff text between two revs
    pub fn diff_text(&self, from: &str, to: &str) -> Result<String, MinerError> {
        let diff = self.tree_diff(from, to)?;

        let mut output = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            let content = std::str::from_utf8(line.content()).unwrap_or("");
            match line.origin() {
                // diff line types that need the origin character
                '+' | '-' | ' ' => output.push(line.origin()),
                // other origin types (headers, etc.) don't need the character
                _ => {}
            }
            output.push_str(content);
            true
        })?;

        Ok(output)
    }

    /// mailbox-format patch series for `from..to`, concatenated in commit order
    ///
    /// format-patch has no libgit2 equivalent, so this shells out like clone
    /// and checkout do
    pub fn format_patch(&self, from: &str, to: &str) -> Result<String, MinerError> {
        let output = self
            .git_command()
            .args(["format-patch", &format!("{from}..{to}"), "--stdout"])
            .output()
            .map_err(|e| MinerError::vcs("format-patch", e.to_string()))?;
        let stdout = expect_success("format-patch", output)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    /// delete the working copy from disk
    pub fn remove(self) -> Result<(), MinerError> {
        info!("removing working copy {}", self.path.display());
        // drop the open repository before deleting its directory
        let WorkingCopy { path, repo } = self;
        drop(repo);
        fs::remove_dir_all(&path)?;
        Ok(())
    }

    fn git_command(&self) -> Command {
        let mut command = Command::new("git");
        command.current_dir(&self.path);
        command
    }

    fn tree_diff(&self, from: &str, to: &str) -> Result<git2::Diff<'_>, MinerError> {
        let from_tree = self.repo.revparse_single(from)?.peel_to_tree()?;
        let to_tree = self.repo.revparse_single(to)?.peel_to_tree()?;
        Ok(self
            .repo
            .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), None)?)
    }
}

/// map a non-zero git exit into a `Vcs` error carrying trimmed stderr
fn expect_success(op: &'static str, output: Output) -> Result<Vec<u8>, MinerError> {
    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(MinerError::vcs(
            op,
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ))
    }
}
