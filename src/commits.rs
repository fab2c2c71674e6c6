use log::{info, warn};
use serde::Deserialize;

/// one commit as returned by the listing service
/// the parent sha is not carried here; it is resolved lazily against the
/// working copy when the commit is processed
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub commit: CommitDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetails {
    pub message: String,
}

impl CommitRecord {
    pub fn message(&self) -> &str {
        &self.commit.message
    }
}

/// filter commits whose message contains any keyword, case-insensitively
/// input order is preserved; an empty result is a normal outcome
pub fn select_matching<'a>(commits: &'a [CommitRecord], keywords: &[String]) -> Vec<&'a CommitRecord> {
    info!("searching for keywords {keywords:?} in {} commits", commits.len());

    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let matching: Vec<&CommitRecord> = commits
        .iter()
        .filter(|record| {
            let message = record.message().to_lowercase();
            lowered.iter().any(|keyword| message.contains(keyword))
        })
        .inspect(|record| info!("keyword found in commit: {}", record.sha))
        .collect();

    if matching.is_empty() {
        warn!("no keywords found in any commit");
    }
    matching
}
