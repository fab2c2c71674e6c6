use crate::constants::{MODIFIED_DIR, ORIGINAL_DIR};
use crate::error::MinerError;
use crate::git::WorkingCopy;
use filetime::FileTime;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::Path;

/// per-extraction copy accounting; `missing` counts paths that were absent
/// from the working copy at one of the two refs (adds and deletes)
#[derive(Debug, Default)]
pub struct ExtractionResult {
    pub copied: usize,
    pub missing: usize,
}

/// materialize the before/after state of `changed_files` under `out_dir`
///
/// checks out the parent, copies every changed path into `original/`, checks
/// out the target, and repeats into `modified/`. The same path list drives
/// both sides, so the attempted sets correspond one-to-one even though a file
/// may exist at only one ref. Extraction is not atomic: a checkout or write
/// failure mid-way leaves a partially populated folder and is surfaced to the
/// caller as a per-commit failure.
pub fn extract(
    working_copy: &WorkingCopy,
    changed_files: &[String],
    parent: &str,
    target: &str,
    out_dir: &Path,
) -> Result<ExtractionResult, MinerError> {
    let mut result = ExtractionResult::default();

    working_copy.checkout(parent)?;
    copy_files(target, working_copy.path(), changed_files, out_dir, ORIGINAL_DIR, &mut result)?;

    working_copy.checkout(target)?;
    copy_files(target, working_copy.path(), changed_files, out_dir, MODIFIED_DIR, &mut result)?;

    Ok(result)
}

/// copy each changed path from the working copy into `out_dir/<side>/`
/// a path absent at the current checkout is logged and counted, not an error
fn copy_files(
    sha: &str,
    source_root: &Path,
    changed_files: &[String],
    out_dir: &Path,
    side: &str,
    result: &mut ExtractionResult,
) -> Result<(), MinerError> {
    for rel_path in changed_files {
        let source = source_root.join(rel_path);
        let dest = out_dir.join(side).join(rel_path);

        if let Some(dest_parent) = dest.parent() {
            fs::create_dir_all(dest_parent)?;
        }

        if source.is_file() {
            copy_with_metadata(&source, &dest)?;
            info!("copied {side} {rel_path} for commit {sha}");
            result.copied += 1;
        } else {
            warn!("{side} file {rel_path} not found for commit {sha}");
            result.missing += 1;
        }
    }
    Ok(())
}

/// copy a file carrying permissions and modification time along
fn copy_with_metadata(source: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(source, dest)?;
    let metadata = fs::metadata(source)?;
    filetime::set_file_mtime(dest, FileTime::from_last_modification_time(&metadata))?;
    Ok(())
}
