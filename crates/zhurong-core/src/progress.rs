//! Progress reporting capability
//!
//! Everything that draws to the terminal goes through a [`ProgressReporter`]
//! handed to each component, so the workflow can run against a recording
//! reporter in tests and against cliclack spinners in the CLI.

/// Sink for spinner state and user-facing status lines
pub trait ProgressReporter: Send + Sync {
    /// Start (or restart) the progress indicator with a label
    fn start(&self, label: &str);

    /// Stop the indicator, marking it successful
    fn succeed(&self, message: &str);

    /// Stop the indicator, marking it failed
    fn fail(&self, message: &str);

    /// Print an error line (shown in red by terminal reporters)
    fn error(&self, message: &str);

    /// Print an informational line
    fn info(&self, message: &str);

    /// Announce a created project and the commands to run next
    fn created(&self, project_name: &str, next_steps: &[String]);
}
