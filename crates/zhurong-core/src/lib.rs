//! Zhurong Core - project scaffolding from remote template repositories
//!
//! The `create` flow picks a template repository and a version tag from a
//! GitHub-style registry, then downloads that tag into a new project
//! directory. Every network call is wrapped in a spinner that retries on
//! failure after a fixed pause.
//!
//! # Architecture
//!
//! - **Collaborators** - [`Catalog`], [`Downloader`], [`Prompt`] and
//!   [`ProgressReporter`] traits, with HTTP and cliclack implementations
//! - **Orchestration** - [`TaskRunner`], [`TemplateFetcher`] and
//!   [`ScaffoldWorkflow`], generic over a [`ProductConfig`]
//! - **CLI/TUI** - cliclack prompts and spinners (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts and spinners
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use zhurong_core::{Collaborators, RetryPolicy, ScaffoldRequest, ScaffoldWorkflow};
//!
//! let services = Collaborators { catalog: &catalog, downloader: &downloader, prompt: &prompt, reporter: &reporter };
//! let request = ScaffoldRequest::new("demo", &std::env::current_dir()?, false);
//! let outcome = ScaffoldWorkflow::new(&MyConfig, services, RetryPolicy::default())
//!     .run(&request)
//!     .await?;
//! ```

pub mod error;
pub mod logging;
pub mod product;
pub mod progress;
pub mod prompt;
pub mod registry;
pub mod retry;
pub mod templates;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod http_fixture;

// Re-export main types for convenience
pub use error::FetchError;
pub use product::ProductConfig;
pub use progress::ProgressReporter;
pub use prompt::{OverwriteChoice, Prompt, PromptError};
pub use registry::{Catalog, RegistryClient, TagDescriptor, TemplateDescriptor};
pub use retry::{RetryError, RetryPolicy, TaskRunner};
pub use templates::{ArchiveDownloader, Collaborators, Downloader, RepoLocation, TemplateFetcher};
pub use workflow::{ScaffoldOutcome, ScaffoldRequest, ScaffoldWorkflow};

#[cfg(feature = "tui")]
pub use tui::run;
