//! CLI prompts using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{ClackPrompt, SpinnerReporter};

#[cfg(feature = "tui")]
use crate::{
    product::ProductConfig,
    registry::RegistryClient,
    retry::RetryPolicy,
    templates::{ArchiveDownloader, Collaborators},
    workflow::{ScaffoldOutcome, ScaffoldRequest, ScaffoldWorkflow},
};

/// Run the create command with interactive prompts
#[cfg(feature = "tui")]
pub async fn run<C: ProductConfig>(
    config: &C,
    request: ScaffoldRequest,
    policy: RetryPolicy,
) -> anyhow::Result<ScaffoldOutcome> {
    cliclack::intro(config.display_name())?;

    let catalog = RegistryClient::from_config(config)?;
    tracing::debug!(registry = %catalog.base_url(), "using template registry");

    let downloader = ArchiveDownloader::new(config.user_agent())
        .with_token(std::env::var(config.token_env()).ok());
    let prompt = ClackPrompt;
    let reporter = SpinnerReporter::new();

    let services = Collaborators {
        catalog: &catalog,
        downloader: &downloader,
        prompt: &prompt,
        reporter: &reporter,
    };

    let outcome = ScaffoldWorkflow::new(config, services, policy)
        .run(&request)
        .await?;

    if outcome == ScaffoldOutcome::Cancelled {
        cliclack::outro_cancel("Nothing was changed")?;
    }

    Ok(outcome)
}
