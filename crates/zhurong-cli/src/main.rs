//! Zhurong CLI - Project scaffolding from zhurong-cli templates

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::time::Duration;
use zhurong_core::{ProductConfig, RetryPolicy, ScaffoldRequest};

/// Zhurong product configuration
#[derive(Clone)]
pub struct ZhurongConfig;

impl ProductConfig for ZhurongConfig {
    fn name(&self) -> &'static str {
        "zhurong-cli"
    }

    fn display_name(&self) -> &'static str {
        "Zhurong"
    }

    fn organization(&self) -> &'static str {
        "zhurong-cli"
    }

    fn default_registry_url(&self) -> &'static str {
        "https://api.github.com"
    }

    fn registry_url_env(&self) -> &'static str {
        "ZHURONG_REGISTRY_URL"
    }

    fn next_steps(&self, project_name: &str) -> Vec<String> {
        vec![
            format!("cd {}", project_name),
            "pnpm i".to_string(),
            "pnpm run serve".to_string(),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "zr")]
#[command(about = "CLI for scaffolding projects from zhurong-cli templates")]
#[command(version)]
pub struct Args {
    /// Print diagnostic logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a template
    Create(CreateArgs),
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Name of the project directory to create
    pub project_name: String,

    /// Overwrite the target directory if it exists
    #[arg(short, long)]
    pub force: bool,

    /// Pause between retries of a failed request, in milliseconds
    #[arg(long = "retry-delay", value_name = "MS", default_value_t = 1000)]
    pub retry_delay: u64,

    /// Give up after this many attempts per request (0 retries forever)
    #[arg(long = "max-attempts", value_name = "N", default_value_t = 0)]
    pub max_attempts: u32,
}

impl CreateArgs {
    fn policy(&self) -> RetryPolicy {
        RetryPolicy::unbounded(Duration::from_millis(self.retry_delay))
            .with_max_attempts(self.max_attempts)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    zhurong_core::logging::init_logging(args.verbose)?;

    let config = ZhurongConfig;

    match args.command {
        Command::Create(create_args) => {
            let cwd = std::env::current_dir().context("Failed to read the current directory")?;
            let request =
                ScaffoldRequest::new(&create_args.project_name, &cwd, create_args.force);

            let result = zhurong_core::run(&config, request, create_args.policy()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result.map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args_parse() {
        let args = Args::try_parse_from(["zr", "create", "demo", "--force"]).unwrap();
        let Command::Create(create) = args.command;
        assert_eq!(create.project_name, "demo");
        assert!(create.force);
        assert_eq!(create.policy(), RetryPolicy::default());
    }

    #[test]
    fn test_retry_flags() {
        let args = Args::try_parse_from([
            "zr",
            "-v",
            "create",
            "demo",
            "--retry-delay",
            "250",
            "--max-attempts",
            "5",
        ])
        .unwrap();
        assert!(args.verbose);
        let Command::Create(create) = args.command;
        let policy = create.policy();
        assert_eq!(policy.delay, Duration::from_millis(250));
        assert_eq!(policy.max_attempts.map(|n| n.get()), Some(5));
    }

    #[test]
    fn test_project_name_required() {
        assert!(Args::try_parse_from(["zr", "create"]).is_err());
    }

    #[test]
    fn test_next_steps() {
        assert_eq!(
            ZhurongConfig.next_steps("demo"),
            vec!["cd demo", "pnpm i", "pnpm run serve"]
        );
    }
}
