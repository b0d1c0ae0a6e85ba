//! Template repository locations
//!
//! A location is written `[host:]owner/name[#checkout]`, e.g.
//! `zhurong-cli/vue3-template#v1.0.0` or `gitlab:acme/starter`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Checkout used when a location names no tag or branch
pub const DEFAULT_CHECKOUT: &str = "master";

/// Git hosting service serving the repository archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GitHost {
    #[default]
    GitHub,
    GitLab,
    Bitbucket,
}

impl GitHost {
    fn prefix(self) -> &'static str {
        match self {
            GitHost::GitHub => "github",
            GitHost::GitLab => "gitlab",
            GitHost::Bitbucket => "bitbucket",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "github" => Some(GitHost::GitHub),
            "gitlab" => Some(GitHost::GitLab),
            "bitbucket" => Some(GitHost::Bitbucket),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("unknown git host '{0}'")]
    UnknownHost(String),

    #[error("expected 'owner/name' in template location '{0}'")]
    MissingOwner(String),
}

/// A downloadable template repository at an optional tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub host: GitHost,
    pub owner: String,
    pub name: String,
    pub checkout: Option<String>,
}

impl RepoLocation {
    /// A GitHub location; an empty checkout means the default branch
    pub fn github(owner: impl Into<String>, name: impl Into<String>, checkout: Option<&str>) -> Self {
        Self {
            host: GitHost::GitHub,
            owner: owner.into(),
            name: name.into(),
            checkout: checkout
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }

    /// The tag or branch that will be downloaded
    pub fn checkout(&self) -> &str {
        self.checkout.as_deref().unwrap_or(DEFAULT_CHECKOUT)
    }

    /// URL of the zip archive for this location
    pub fn archive_url(&self) -> Result<Url, url::ParseError> {
        let (owner, name, checkout) = (&self.owner, &self.name, self.checkout());
        let raw = match self.host {
            GitHost::GitHub => format!("https://github.com/{owner}/{name}/archive/{checkout}.zip"),
            GitHost::GitLab => {
                format!("https://gitlab.com/{owner}/{name}/repository/archive.zip?ref={checkout}")
            }
            GitHost::Bitbucket => format!("https://bitbucket.org/{owner}/{name}/get/{checkout}.zip"),
        };
        Url::parse(&raw)
    }
}

impl fmt::Display for RepoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host != GitHost::GitHub {
            write!(f, "{}:", self.host.prefix())?;
        }
        write!(f, "{}/{}", self.owner, self.name)?;
        if let Some(checkout) = &self.checkout {
            write!(f, "#{checkout}")?;
        }
        Ok(())
    }
}

impl FromStr for RepoLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, rest) = match s.split_once(':') {
            Some((prefix, rest)) => (
                GitHost::from_prefix(prefix)
                    .ok_or_else(|| LocationError::UnknownHost(prefix.to_string()))?,
                rest,
            ),
            None => (GitHost::GitHub, s),
        };

        let (path, checkout) = match rest.split_once('#') {
            Some((path, checkout)) => (path, Some(checkout)),
            None => (rest, None),
        };

        let (owner, name) = path
            .split_once('/')
            .filter(|(owner, name)| !owner.is_empty() && !name.is_empty() && !name.contains('/'))
            .ok_or_else(|| LocationError::MissingOwner(s.to_string()))?;

        Ok(Self {
            host,
            ..Self::github(owner, name, checkout)
        })
    }
}
