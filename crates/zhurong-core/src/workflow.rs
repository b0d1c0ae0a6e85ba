//! The `create` command: target directory handling, then template fetch

use crate::product::ProductConfig;
use crate::prompt::OverwriteChoice;
use crate::retry::RetryPolicy;
use crate::templates::fetcher::{Collaborators, TemplateFetcher};
use crate::templates::location::RepoLocation;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// One invocation of the create command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub project_name: String,
    pub target_path: PathBuf,
    pub force_overwrite: bool,
}

impl ScaffoldRequest {
    /// The project is created in `cwd/<project_name>`
    pub fn new(project_name: impl Into<String>, cwd: &Path, force_overwrite: bool) -> Self {
        let project_name = project_name.into();
        Self {
            target_path: cwd.join(&project_name),
            project_name,
            force_overwrite,
        }
    }
}

/// How a scaffold run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    Created {
        target: PathBuf,
        location: RepoLocation,
    },
    /// The user declined to overwrite an existing directory
    Cancelled,
}

pub struct ScaffoldWorkflow<'a, C: ProductConfig> {
    services: Collaborators<'a>,
    fetcher: TemplateFetcher<'a, C>,
}

impl<'a, C: ProductConfig> ScaffoldWorkflow<'a, C> {
    pub fn new(config: &'a C, services: Collaborators<'a>, policy: RetryPolicy) -> Self {
        Self {
            services,
            fetcher: TemplateFetcher::new(config, services, policy),
        }
    }

    pub async fn run(&self, request: &ScaffoldRequest) -> Result<ScaffoldOutcome> {
        let target = request.target_path.as_path();

        let exists = fs::try_exists(target)
            .await
            .with_context(|| format!("Failed to inspect {}", target.display()))?;

        if exists {
            if request.force_overwrite {
                tracing::debug!(target = %target.display(), "--force given, removing existing directory");
                remove_path(target).await?;
            } else {
                match self.services.prompt.confirm_overwrite(target).await? {
                    OverwriteChoice::Overwrite => self.remove_with_progress(target).await?,
                    OverwriteChoice::Cancel => {
                        self.services.reporter.info("cancel");
                        return Ok(ScaffoldOutcome::Cancelled);
                    }
                }
            }
        }

        let location = self
            .fetcher
            .resolve_and_download(&request.project_name, target)
            .await?;

        Ok(ScaffoldOutcome::Created {
            target: request.target_path.clone(),
            location,
        })
    }

    async fn remove_with_progress(&self, target: &Path) -> Result<()> {
        let reporter = self.services.reporter;
        reporter.start("removing");

        match remove_path(target).await {
            Ok(()) => {
                reporter.succeed(&format!("{} removed", target.display()));
                Ok(())
            }
            Err(e) => {
                reporter.fail("removing failed");
                Err(e)
            }
        }
    }
}

/// Remove a directory tree, or a plain file occupying the target path
async fn remove_path(target: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(target)
        .await
        .with_context(|| format!("Failed to inspect {}", target.display()))?;

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(target).await
    } else {
        fs::remove_file(target).await
    };
    removed.with_context(|| format!("Failed to remove {}", target.display()))
}
