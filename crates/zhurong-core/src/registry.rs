//! Template registry client
//!
//! The registry is a GitHub-style REST API: the template organization's
//! repositories are the selectable templates and each repository's tags are
//! its versions.

use crate::error::FetchError;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// A selectable template repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    pub name: String,
}

/// A selectable version of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDescriptor {
    pub name: String,
}

/// Source of templates and their versions
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List available templates, in registry order
    async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, FetchError>;

    /// List the tags of one template, in registry order
    async fn list_tags(&self, repo: &str) -> Result<Vec<TagDescriptor>, FetchError>;
}

/// HTTP client for a GitHub-compatible registry
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: Url,
    organization: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl RegistryClient {
    /// Create a client with a custom user agent
    pub fn new(base_url: Url, organization: impl Into<String>, user_agent: &str) -> Self {
        Self {
            base_url,
            organization: organization.into(),
            token: None,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Authenticate registry requests with a bearer token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Create a client from a product config, honoring its environment overrides
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.registry_url_env())
            .unwrap_or_else(|_| config.default_registry_url().to_string());
        let base_url =
            Url::parse(&url_str).with_context(|| format!("Invalid registry URL: {}", url_str))?;
        let token = std::env::var(config.token_env()).ok();

        Ok(Self::new(base_url, config.organization(), config.user_agent()).with_token(token))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL by appending path segments, preserving query parameters
    fn build_url(base: &Url, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn templates_url(&self) -> Result<Url, FetchError> {
        Self::build_url(&self.base_url, &["orgs", self.organization.as_str(), "repos"])
    }

    fn tags_url(&self, repo: &str) -> Result<Url, FetchError> {
        Self::build_url(&self.base_url, &["repos", self.organization.as_str(), repo, "tags"])
    }

    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, FetchError> {
        tracing::debug!(%url, "querying registry");

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::from_response(status, &body));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Catalog for RegistryClient {
    async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, FetchError> {
        let url = self.templates_url()?;
        self.get_list(url).await
    }

    async fn list_tags(&self, repo: &str) -> Result<Vec<TagDescriptor>, FetchError> {
        let url = self.tags_url(repo)?;
        self.get_list(url).await
    }
}
