//! Interactive choices made by the user

use async_trait::async_trait;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Answer to the "target directory exists" question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteChoice {
    Overwrite,
    Cancel,
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("no choices to pick from")]
    NoChoices,

    #[error("prompt interrupted")]
    Interrupted,

    #[error("prompt failed: {0}")]
    Io(io::Error),

    #[error("prompt task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::Interrupted {
            PromptError::Interrupted
        } else {
            PromptError::Io(err)
        }
    }
}

/// Asks the user to choose
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Single-select list; returns one element of `choices`
    async fn pick(&self, message: &str, choices: &[String]) -> Result<String, PromptError>;

    /// Ask whether an existing `target` directory may be overwritten
    async fn confirm_overwrite(&self, target: &Path) -> Result<OverwriteChoice, PromptError>;
}

/// Reject an empty choice list before anything is drawn
pub fn ensure_choices(choices: &[String]) -> Result<(), PromptError> {
    if choices.is_empty() {
        Err(PromptError::NoChoices)
    } else {
        Ok(())
    }
}
