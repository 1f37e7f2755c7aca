//! `ghcommits`: resolve the target repository and render its latest commits.

use crate::api::github::{Commit, CommitListing, CommitSource};
use crate::config::GithubConfig;
use crate::constants::GITHUB_COMMITS_PER_PAGE;
use tracing::warn;

pub const NO_DEFAULT_REPO: &str = "No default repo configured. Use `!ghcommits user/repo`.";

/// `owner/repo` is taken as-is, a bare `repo` gets the default owner, and no argument
/// falls back to the configured default repo. `None` means there is nothing to query.
pub fn resolve_repo(arg: Option<&str>, cfg: &GithubConfig) -> Option<String> {
    match arg.map(str::trim).filter(|a| !a.is_empty()) {
        Some(repo) if repo.contains('/') => Some(repo.to_string()),
        Some(repo) => Some(format!("{}/{repo}", cfg.default_owner)),
        None if cfg.default_repo.is_empty() => None,
        None => Some(format!("{}/{}", cfg.default_owner, cfg.default_repo)),
    }
}

pub fn format_commit(c: &Commit) -> String {
    format!(
        "- `{}` by **{}** – {}",
        c.short_sha(),
        c.author_name(),
        c.summary()
    )
}

pub fn format_listing(full_repo: &str, listing: &CommitListing) -> String {
    match listing {
        CommitListing::Status(code) => {
            format!("GitHub API returned {code} for `{full_repo}`.")
        }
        CommitListing::Commits(commits) if commits.is_empty() => {
            format!("No commits found for `{full_repo}`.")
        }
        CommitListing::Commits(commits) => {
            let mut lines = vec![format!("**Last commits for `{full_repo}`:**")];
            lines.extend(commits.iter().map(format_commit));
            lines.join("\n")
        }
    }
}

pub async fn recent_commits(
    source: &dyn CommitSource,
    cfg: &GithubConfig,
    arg: Option<&str>,
) -> String {
    let Some(full_repo) = resolve_repo(arg, cfg) else {
        return NO_DEFAULT_REPO.to_string();
    };
    match source
        .recent_commits(&full_repo, GITHUB_COMMITS_PER_PAGE)
        .await
    {
        Ok(listing) => format_listing(&full_repo, &listing),
        Err(e) => {
            warn!(target = "github", repo = %full_repo, error = %e, "commit listing failed");
            format!("Error talking to GitHub: `{e}`")
        }
    }
}
