use crate::error::MinerError;
use std::fs;
use std::path::Path;

/// a repository named by its clone URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    pub url: String,
}

impl RepoRef {
    /// derive owner and name from the last two path segments of the URL
    ///
    /// a trailing `.git` is stripped from the name so the commit-listing API
    /// path and the output layout use the bare repository name
    pub fn parse(url: &str) -> Result<RepoRef, MinerError> {
        let parts: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() < 2 {
            return Err(MinerError::InvalidRepoUrl(url.to_string()));
        }

        let owner = parts[parts.len() - 2];
        let name = parts[parts.len() - 1]
            .strip_suffix(".git")
            .unwrap_or(parts[parts.len() - 1]);
        if owner.is_empty() || name.is_empty() {
            return Err(MinerError::InvalidRepoUrl(url.to_string()));
        }

        Ok(RepoRef {
            owner: owner.to_string(),
            name: name.to_string(),
            url: url.to_string(),
        })
    }
}

/// read repository URLs from a newline-delimited file
/// blank lines and `#` comment lines are skipped
pub fn read_repository_list(path: &Path) -> Result<Vec<String>, MinerError> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
