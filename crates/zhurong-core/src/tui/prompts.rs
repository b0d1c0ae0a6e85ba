//! Charm-style CLI prompts and spinners using cliclack

use crate::progress::ProgressReporter;
use crate::prompt::{ensure_choices, OverwriteChoice, Prompt, PromptError};
use async_trait::async_trait;
use cliclack::ProgressBar;
use colored::Colorize;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

const OVERWRITE_PROMPT: &str = "Target directory exists, please choose whether to overwrite it.";

/// Select prompts rendered with cliclack
///
/// The terminal interaction blocks, so it runs on the blocking pool and only
/// the calling task waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompt;

#[async_trait]
impl Prompt for ClackPrompt {
    async fn pick(&self, message: &str, choices: &[String]) -> Result<String, PromptError> {
        ensure_choices(choices)?;

        let message = message.to_string();
        let choices = choices.to_vec();
        tokio::task::spawn_blocking(move || {
            // Use indices so the answer is always an element of `choices`
            let mut select = cliclack::select(message);
            for (idx, choice) in choices.iter().enumerate() {
                select = select.item(idx, choice, "");
            }

            let selected_idx: usize = select.interact()?;
            choices.get(selected_idx).cloned().ok_or(PromptError::NoChoices)
        })
        .await?
    }

    async fn confirm_overwrite(&self, target: &Path) -> Result<OverwriteChoice, PromptError> {
        let hint = target.display().to_string();
        tokio::task::spawn_blocking(move || {
            let choice = cliclack::select(OVERWRITE_PROMPT)
                .item(OverwriteChoice::Overwrite, "overwrite", hint)
                .item(OverwriteChoice::Cancel, "cancel", "")
                .interact()?;
            Ok(choice)
        })
        .await?
    }
}

/// Progress reporter drawing cliclack spinners and log lines
///
/// Each `start` draws a fresh spinner; the previous one, if still running,
/// is cleared first.
#[derive(Default)]
pub struct SpinnerReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProgressReporter for SpinnerReporter {
    fn start(&self, label: &str) {
        let mut slot = self.slot();
        if let Some(previous) = slot.take() {
            previous.clear();
        }

        let spinner = cliclack::spinner();
        spinner.start(label);
        *slot = Some(spinner);
    }

    fn succeed(&self, message: &str) {
        if let Some(spinner) = self.slot().take() {
            spinner.stop(message);
        }
    }

    fn fail(&self, message: &str) {
        if let Some(spinner) = self.slot().take() {
            spinner.error(message);
        }
    }

    fn error(&self, message: &str) {
        let _ = cliclack::log::error(message.red());
    }

    fn info(&self, message: &str) {
        let _ = cliclack::log::info(message.cyan());
    }

    fn created(&self, project_name: &str, next_steps: &[String]) {
        println!();
        println!("  Successfully created project {}", project_name.cyan());
        println!();

        for step in next_steps {
            println!("    {}", step);
        }

        let _ = cliclack::outro("Happy coding!");
    }
}
