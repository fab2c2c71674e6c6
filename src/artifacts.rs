use crate::constants::{DIFF_SUFFIX, PATCH_SUFFIX};
use crate::error::MinerError;
use crate::git::WorkingCopy;
use log::info;
use std::fs;
use std::path::Path;

/// persist the unified diff and the mailbox-format patch series for one commit
///
/// writes `<target>_diff.diff` and `<target>_patch.patch` into `out_dir`;
/// a VCS or write failure here is fatal to this commit only
pub fn write_diff_and_patch(
    working_copy: &WorkingCopy,
    parent: &str,
    target: &str,
    out_dir: &Path,
) -> Result<(), MinerError> {
    let diff = working_copy.diff_text(parent, target)?;
    let diff_path = out_dir.join(format!("{target}{DIFF_SUFFIX}"));
    fs::write(&diff_path, &diff)?;
    info!("wrote diff for commit {target} to {}", diff_path.display());

    let patch = working_copy.format_patch(parent, target)?;
    let patch_path = out_dir.join(format!("{target}{PATCH_SUFFIX}"));
    fs::write(&patch_path, &patch)?;
    info!("wrote patch for commit {target} to {}", patch_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{clone_fixture, commit_all, create_file, setup_test_repo};

    fn fixture_with_change() -> (tempfile::TempDir, String, String) {
        let (fixture, repo) = setup_test_repo();
        create_file(&fixture.path().join("code.py"), "print('hello')\n");
        let first = commit_all(&repo, "initial commit");
        create_file(&fixture.path().join("code.py"), "print('goodbye')\n");
        let second = commit_all(&repo, "feat: change greeting");
        (fixture, first, second)
    }

    #[test]
    fn writes_diff_and_patch_files() {
        let (fixture, first, second) = fixture_with_change();
        let (_clone_dir, wc) = clone_fixture(fixture.path());
        let out = tempfile::TempDir::new().unwrap();

        write_diff_and_patch(&wc, &first, &second, out.path()).unwrap();

        let diff = fs::read_to_string(out.path().join(format!("{second}_diff.diff"))).unwrap();
        assert!(diff.contains("-print('hello')"));
        assert!(diff.contains("+print('goodbye')"));

        let patch = fs::read_to_string(out.path().join(format!("{second}_patch.patch"))).unwrap();
        assert!(patch.contains("Subject:"), "mailbox format carries headers");
        assert!(patch.contains("feat: change greeting"));
    }

    #[test]
    fn patch_applies_onto_the_parent_state() {
        let (fixture, first, second) = fixture_with_change();
        let (_clone_dir, wc) = clone_fixture(fixture.path());
        let out = tempfile::TempDir::new().unwrap();

        write_diff_and_patch(&wc, &first, &second, out.path()).unwrap();

        wc.checkout(&first).unwrap();
        let status = std::process::Command::new("git")
            .arg("apply")
            .arg(out.path().join(format!("{second}_patch.patch")))
            .current_dir(wc.path())
            .status()
            .unwrap();
        assert!(status.success(), "patch must apply cleanly to the parent");
        assert_eq!(
            fs::read_to_string(wc.path().join("code.py")).unwrap(),
            "print('goodbye')\n"
        );
    }

    #[test]
    fn repeated_writes_are_idempotent() {
        let (fixture, first, second) = fixture_with_change();
        let (_clone_dir, wc) = clone_fixture(fixture.path());
        let out = tempfile::TempDir::new().unwrap();

        write_diff_and_patch(&wc, &first, &second, out.path()).unwrap();
        let diff_path = out.path().join(format!("{second}_diff.diff"));
        let first_diff = fs::read(&diff_path).unwrap();

        write_diff_and_patch(&wc, &first, &second, out.path()).unwrap();
        assert_eq!(fs::read(&diff_path).unwrap(), first_diff);
    }
}
