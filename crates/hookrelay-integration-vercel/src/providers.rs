//! Source-control metadata
//!
//! Deployments triggered from Git carry provider-prefixed keys in their
//! `meta` map. Providers are consulted in [`GitProvider::PRECEDENCE`] order
//! and the first one with a value wins.

use std::fmt;

use crate::event::DeploymentMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitProvider {
    GitHub,
    GitLab,
    Bitbucket,
}

impl GitProvider {
    pub const PRECEDENCE: [GitProvider; 3] =
        [GitProvider::GitHub, GitProvider::GitLab, GitProvider::Bitbucket];

    fn login_key(&self) -> Option<&'static str> {
        match self {
            GitProvider::GitHub => Some("githubCommitAuthorLogin"),
            GitProvider::GitLab => Some("gitlabCommitAuthorLogin"),
            GitProvider::Bitbucket => None,
        }
    }

    fn name_key(&self) -> &'static str {
        match self {
            GitProvider::GitHub => "githubCommitAuthorName",
            GitProvider::GitLab => "gitlabCommitAuthorName",
            GitProvider::Bitbucket => "bitbucketCommitAuthorName",
        }
    }

    fn sha_key(&self) -> &'static str {
        match self {
            GitProvider::GitHub => "githubCommitSha",
            GitProvider::GitLab => "gitlabCommitSha",
            GitProvider::Bitbucket => "bitbucketCommitSha",
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            GitProvider::GitHub => "githubCommitMessage",
            GitProvider::GitLab => "gitlabCommitMessage",
            GitProvider::Bitbucket => "bitbucketCommitMessage",
        }
    }

    fn ref_key(&self) -> &'static str {
        match self {
            GitProvider::GitHub => "githubCommitRef",
            GitProvider::GitLab => "gitlabCommitRef",
            GitProvider::Bitbucket => "bitbucketCommitRef",
        }
    }

    fn org_keys(&self) -> &'static [&'static str] {
        match self {
            GitProvider::GitHub => &["githubCommitOrg", "githubOrg"],
            GitProvider::GitLab => &["gitlabProjectNamespace"],
            GitProvider::Bitbucket => &["bitbucketRepoOwner", "bitbucketRepoWorkspace"],
        }
    }

    fn repo_keys(&self) -> &'static [&'static str] {
        match self {
            GitProvider::GitHub => &["githubCommitRepo", "githubRepo"],
            GitProvider::GitLab => &["gitlabProjectName"],
            GitProvider::Bitbucket => &["bitbucketRepoSlug", "bitbucketRepoName"],
        }
    }

    fn default_host(&self) -> &'static str {
        match self {
            GitProvider::GitHub => "github.com",
            GitProvider::GitLab => "gitlab.com",
            GitProvider::Bitbucket => "bitbucket.org",
        }
    }

    /// Path segment between the repository URL and a commit sha
    fn commit_path(&self) -> &'static str {
        match self {
            GitProvider::GitHub => "commit",
            GitProvider::GitLab => "-/commit",
            GitProvider::Bitbucket => "commits",
        }
    }
}

impl fmt::Display for GitProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitProvider::GitHub => write!(f, "GitHub"),
            GitProvider::GitLab => write!(f, "GitLab"),
            GitProvider::Bitbucket => write!(f, "Bitbucket"),
        }
    }
}

/// A repository on a Git provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub provider: GitProvider,
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// `owner/name`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.name)
    }

    pub fn commit_url(&self, sha: &str) -> String {
        format!("{}/{}/{}", self.url(), self.provider.commit_path(), sha)
    }
}

impl DeploymentMeta {
    fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    fn first_provider<'a, F>(&'a self, lookup: F) -> Option<(GitProvider, &'a str)>
    where
        F: Fn(&'a Self, GitProvider) -> Option<&'a str>,
    {
        GitProvider::PRECEDENCE
            .iter()
            .find_map(|&provider| lookup(self, provider).map(|value| (provider, value)))
    }

    pub fn branch(&self) -> Option<&str> {
        self.first_provider(|meta, p| meta.get(p.ref_key()))
            .map(|(_, value)| value)
    }

    /// Login before display name, within each provider
    pub fn author(&self) -> Option<&str> {
        self.first_provider(|meta, p| {
            p.login_key()
                .and_then(|key| meta.get(key))
                .or_else(|| meta.get(p.name_key()))
        })
        .map(|(_, value)| value)
    }

    pub fn commit_sha(&self) -> Option<(GitProvider, &str)> {
        self.first_provider(|meta, p| meta.get(p.sha_key()))
    }

    pub fn commit_message(&self) -> Option<&str> {
        self.first_provider(|meta, p| meta.get(p.message_key()))
            .map(|(_, value)| value)
    }

    /// Repository on `provider`, when both owner and name are present
    pub fn repository_on(&self, provider: GitProvider) -> Option<Repository> {
        let owner = self.first_of(provider.org_keys())?;
        let name = self.first_of(provider.repo_keys())?;
        let host = match provider {
            GitProvider::GitHub => self.get("githubHost"),
            _ => None,
        }
        .unwrap_or(provider.default_host());

        Some(Repository {
            provider,
            host: host.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn repository(&self) -> Option<Repository> {
        GitProvider::PRECEDENCE
            .iter()
            .find_map(|&provider| self.repository_on(provider))
    }
}
