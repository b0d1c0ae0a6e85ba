//! Template selection and download
//!
//! Resolves a (template, tag) pair with the user, then downloads it. Every
//! network call goes through the retrying [`TaskRunner`].

use super::archive::Downloader;
use super::location::RepoLocation;
use crate::product::ProductConfig;
use crate::progress::ProgressReporter;
use crate::prompt::Prompt;
use crate::registry::Catalog;
use crate::retry::{RetryPolicy, TaskRunner};
use anyhow::{Context, Result};
use std::path::Path;

pub const TEMPLATE_LIST_LABEL: &str = "fetching repo info...";
pub const DOWNLOAD_LABEL: &str = "downloading template, please wait...";
pub const TEMPLATE_PROMPT: &str = "Please choose a template";
pub const VERSION_PROMPT: &str = "Please choose a version";

/// External services a scaffold run talks to
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub catalog: &'a dyn Catalog,
    pub downloader: &'a dyn Downloader,
    pub prompt: &'a dyn Prompt,
    pub reporter: &'a dyn ProgressReporter,
}

/// Resolves and downloads one template
pub struct TemplateFetcher<'a, C: ProductConfig> {
    config: &'a C,
    services: Collaborators<'a>,
    runner: TaskRunner<'a>,
}

impl<'a, C: ProductConfig> TemplateFetcher<'a, C> {
    pub fn new(config: &'a C, services: Collaborators<'a>, policy: RetryPolicy) -> Self {
        Self {
            config,
            services,
            runner: TaskRunner::new(services.reporter, policy),
        }
    }

    /// Let the user pick a template and version, then download it into `target`
    pub async fn resolve_and_download(
        &self,
        project_name: &str,
        target: &Path,
    ) -> Result<RepoLocation> {
        let repo = self.select_template().await?;
        let tag = self.select_tag(&repo).await?;

        let location = RepoLocation::github(self.config.organization(), repo, tag.as_deref());
        self.download(&location, target).await?;

        self.services
            .reporter
            .created(project_name, &self.config.next_steps(project_name));

        Ok(location)
    }

    async fn select_template(&self) -> Result<String> {
        let catalog = self.services.catalog;
        let templates = self
            .runner
            .run(TEMPLATE_LIST_LABEL, move || catalog.list_templates())
            .await
            .context("Failed to fetch the template list")?;

        let names: Vec<String> = templates.into_iter().map(|t| t.name).collect();
        if names.is_empty() {
            anyhow::bail!("No templates found in {}", self.config.organization());
        }

        Ok(self.services.prompt.pick(TEMPLATE_PROMPT, &names).await?)
    }

    /// Pick a tag of `repo`; `None` when the repository has no tags
    async fn select_tag(&self, repo: &str) -> Result<Option<String>> {
        let catalog = self.services.catalog;
        let tags = self
            .runner
            .run(&format!("fetching {repo} tag info..."), move || {
                catalog.list_tags(repo)
            })
            .await
            .with_context(|| format!("Failed to fetch tags of {repo}"))?;

        let names: Vec<String> = tags.into_iter().map(|t| t.name).collect();
        if names.is_empty() {
            tracing::debug!(repo, "no tags published, using the default branch");
            return Ok(None);
        }

        let tag = self.services.prompt.pick(VERSION_PROMPT, &names).await?;
        Ok(Some(tag))
    }

    async fn download(&self, location: &RepoLocation, target: &Path) -> Result<()> {
        let downloader = self.services.downloader;
        let files = self
            .runner
            .run(DOWNLOAD_LABEL, move || downloader.download(location, target))
            .await
            .with_context(|| format!("Failed to download {location}"))?;

        tracing::debug!(%location, files, "template downloaded");
        Ok(())
    }
}
