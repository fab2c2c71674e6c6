//! git fixture helpers shared by the unit tests

use crate::git::WorkingCopy;
use git2::Repository;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// initialise a test git repository
pub fn setup_test_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();

    // configure git user for commits
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (temp_dir, repo)
}

/// create a file with content, creating parent directories as needed
pub fn create_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// commit the entire worktree state, including deletions, and return the sha
pub fn commit_all(repo: &Repository, message: &str) -> String {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    // add_all does not drop entries for deleted files
    index.update_all(["*"].iter(), None).unwrap();
    index.write().unwrap();

    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let signature = repo.signature().unwrap();

    let parent_commit = repo.head().ok().and_then(|h| h.peel_to_commit().ok());

    let oid = if let Some(parent) = parent_commit {
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )
        .unwrap()
    } else {
        // first commit
        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])
            .unwrap()
    };
    oid.to_string()
}

/// clone a fixture repository into a fresh temp dir and open a working copy
pub fn clone_fixture(fixture: &Path) -> (TempDir, WorkingCopy) {
    let temp_dir = TempDir::new().unwrap();
    let clone_dir = temp_dir.path().join("clone");
    let wc = WorkingCopy::clone_from(&fixture.to_string_lossy(), &clone_dir).unwrap();
    (temp_dir, wc)
}
