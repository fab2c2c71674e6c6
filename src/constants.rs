// commit listing
pub const GITHUB_API_ROOT: &str = "https://api.github.com";
pub const COMMITS_PER_PAGE: u32 = 100;
pub const USER_AGENT: &str = concat!("git-vuln-miner/", env!("CARGO_PKG_VERSION"));

// output layout
pub const ORIGINAL_DIR: &str = "original";
pub const MODIFIED_DIR: &str = "modified";
pub const DIFF_SUFFIX: &str = "_diff.diff";
pub const PATCH_SUFFIX: &str = "_patch.patch";

// scan
pub const SEMGREP_BIN: &str = "semgrep";
pub const SEMGREP_RULESET: &str = "p/security-audit";
pub const FINDINGS_FILE: &str = "semgrep_findings.json";
