use crate::commits::CommitRecord;
use crate::constants::{COMMITS_PER_PAGE, GITHUB_API_ROOT, USER_AGENT};
use crate::repolist::RepoRef;
use log::{info, warn};
use std::env;

/// fetch the commit list for a repository
///
/// the listing service is an external collaborator: transport errors, non-2xx
/// responses and bodies that fail to deserialize all degrade to an empty list
/// with a warning, so downstream logic sees "no matches" rather than a crash
pub fn list_commits(repo: &RepoRef) -> Vec<CommitRecord> {
    info!("fetching commits for {}/{}", repo.owner, repo.name);

    match fetch_commits(repo) {
        Ok(commits) => {
            info!("fetched {} commits for {}/{}", commits.len(), repo.owner, repo.name);
            commits
        }
        Err(e) => {
            warn!(
                "commit listing unavailable for {}/{}: {e}",
                repo.owner, repo.name
            );
            Vec::new()
        }
    }
}

fn fetch_commits(repo: &RepoRef) -> Result<Vec<CommitRecord>, ureq::Error> {
    let url = format!(
        "{GITHUB_API_ROOT}/repos/{}/{}/commits",
        repo.owner, repo.name
    );

    let mut request = ureq::get(&url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/vnd.github+json")
        .query("per_page", COMMITS_PER_PAGE.to_string());

    // unauthenticated requests are heavily rate-limited
    if let Ok(token) = env::var("GITHUB_TOKEN")
        && !token.is_empty()
    {
        request = request.header("Authorization", format!("Bearer {token}"));
    }

    request.call()?.body_mut().read_json::<Vec<CommitRecord>>()
}
