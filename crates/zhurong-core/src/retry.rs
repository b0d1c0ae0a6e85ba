//! Retrying task runner
//!
//! Wraps a fallible async operation in a progress indicator. A failed attempt
//! is reported, followed by a fixed pause, and the same operation is invoked
//! again until it succeeds or the attempt budget (if any) is spent.

use crate::error::GENERIC_FAILURE;
use crate::progress::ProgressReporter;
use std::fmt::Display;
use std::future::Future;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

/// Pause between attempts unless configured otherwise
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Label shown while an operation is being retried
pub const REFETCHING_LABEL: &str = "refetching...";

/// How often and how patiently to retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed pause after each failed attempt
    pub delay: Duration,

    /// Upper bound on attempts; `None` retries forever
    pub max_attempts: Option<NonZeroU32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: DEFAULT_RETRY_DELAY,
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Retry forever with the given pause
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    /// Cap the number of attempts (0 keeps the policy unbounded)
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = NonZeroU32::new(attempts);
        self
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max.get())
    }
}

/// Returned only when a bounded policy runs out of attempts
#[derive(Debug, Error)]
pub enum RetryError<E> {
    #[error("gave up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },
}

/// Runs operations behind a spinner, retrying failures
pub struct TaskRunner<'a> {
    reporter: &'a dyn ProgressReporter,
    policy: RetryPolicy,
}

impl<'a> TaskRunner<'a> {
    pub fn new(reporter: &'a dyn ProgressReporter, policy: RetryPolicy) -> Self {
        Self { reporter, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds
    ///
    /// Attempts are strictly sequential: each one completes (or fails) before
    /// the pause and the next invocation.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.reporter.start(label);

        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);

            match operation().await {
                Ok(value) => {
                    self.reporter.succeed(label);
                    return Ok(value);
                }
                Err(err) => {
                    let message = failure_message(&err);
                    self.reporter.fail(GENERIC_FAILURE);
                    self.reporter.error(&message);
                    tracing::debug!(label, attempts, error = %message, "task attempt failed");

                    if self.policy.exhausted(attempts) {
                        return Err(RetryError::Exhausted {
                            attempts,
                            source: err,
                        });
                    }

                    tokio::time::sleep(self.policy.delay).await;
                    self.reporter.start(REFETCHING_LABEL);
                }
            }
        }
    }
}

fn failure_message(err: &impl Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl ProgressReporter for Recorder {
        fn start(&self, label: &str) {
            self.push(format!("start:{label}"));
        }
        fn succeed(&self, message: &str) {
            self.push(format!("succeed:{message}"));
        }
        fn fail(&self, message: &str) {
            self.push(format!("fail:{message}"));
        }
        fn error(&self, message: &str) {
            self.push(format!("error:{message}"));
        }
        fn info(&self, message: &str) {
            self.push(format!("info:{message}"));
        }
        fn created(&self, project_name: &str, _next_steps: &[String]) {
            self.push(format!("created:{project_name}"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_success_does_not_pause() {
        let recorder = Recorder::default();
        let runner = TaskRunner::new(&recorder, RetryPolicy::default());
        let started = Instant::now();

        let value: Result<u32, RetryError<String>> =
            runner.run("fetching repo info...", || async { Ok(7) }).await;

        assert_eq!(value.unwrap(), 7);
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(
            recorder.events(),
            vec![
                "start:fetching repo info...".to_string(),
                "succeed:fetching repo info...".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_third_attempt() {
        let recorder = Recorder::default();
        let runner = TaskRunner::new(&recorder, RetryPolicy::default());
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let started = Instant::now();

        let value = runner
            .run("fetching repo info...", move || async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(format!("boom {n}"))
                } else {
                    Ok("done")
                }
            })
            .await
            .unwrap();

        assert_eq!(value, "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two pauses of exactly the fixed delay
        assert_eq!(started.elapsed(), DEFAULT_RETRY_DELAY * 2);
        assert_eq!(
            recorder.events(),
            vec![
                "start:fetching repo info...",
                "fail:request failed",
                "error:boom 1",
                "start:refetching...",
                "fail:request failed",
                "error:boom 2",
                "start:refetching...",
                "succeed:fetching repo info...",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_policy_keeps_retrying() {
        let recorder = Recorder::default();
        let runner = TaskRunner::new(&recorder, RetryPolicy::default());
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let outcome = tokio::time::timeout(
            Duration::from_millis(4_500),
            runner.run("downloading template, please wait...", move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>("API rate limit exceeded")
            }),
        )
        .await;

        assert!(outcome.is_err(), "runner must not give up on its own");
        assert!(calls.load(Ordering::SeqCst) >= 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_policy_gives_up() {
        let recorder = Recorder::default();
        let policy = RetryPolicy::unbounded(Duration::from_millis(250)).with_max_attempts(3);
        let runner = TaskRunner::new(&recorder, policy);
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let started = Instant::now();

        let err = runner
            .run("fetching alpha tag info...", move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>("offline")
            })
            .await
            .unwrap_err();

        let RetryError::Exhausted { attempts, source } = err;
        assert_eq!(attempts, 3);
        assert_eq!(source, "offline");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_error_message_uses_generic_text() {
        let recorder = Recorder::default();
        let runner = TaskRunner::new(&recorder, RetryPolicy::default().with_max_attempts(1));

        let _ = runner.run("x", || async { Err::<(), _>("") }).await;

        assert!(recorder.events().contains(&"error:request failed".to_string()));
    }

    #[test]
    fn test_zero_max_attempts_is_unbounded() {
        let policy = RetryPolicy::default().with_max_attempts(0);
        assert_eq!(policy.max_attempts, None);
        assert!(!policy.exhausted(u32::MAX));
    }
}
