//! Sequential execution of a migration plan.

use super::{FailurePolicy, Migration, MigrationReport, RetryPolicy, StepStatus};
use crate::backend::{Backend, BackendError};
use crate::config::Config;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs migration plans against an injected backend.
#[derive(Debug, Clone)]
pub struct Migrator {
    backend: Arc<dyn Backend>,
    failure_policy: FailurePolicy,
    retry_policy: RetryPolicy,
}

impl Migrator {
    /// Best-effort migrator: continue after failures, one attempt per step.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            failure_policy: FailurePolicy::default(),
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn from_config(backend: Arc<dyn Backend>, config: &Config) -> Self {
        Self::new(backend)
            .with_failure_policy(config.failure_policy)
            .with_retry_policy(RetryPolicy::attempts(config.max_attempts))
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Run `plan` in order, awaiting each step before starting the next.
    pub async fn run(&self, plan: &[Migration]) -> MigrationReport {
        info!(steps = plan.len(), "Running schema migrations");
        let mut report = MigrationReport::default();
        let mut halted = false;

        for migration in plan {
            let step = migration.rpc();
            if halted {
                warn!(step, "Skipping migration after earlier failure");
                report.push(step, StepStatus::Skipped, 0);
                continue;
            }

            let (result, attempts) = self.apply(migration).await;
            match result {
                Ok(()) => {
                    info!(step, attempts, "{}", migration.success_message());
                    report.push(step, StepStatus::Applied, attempts);
                }
                Err(e) => {
                    error!(step, attempts, error = %e, "{}", migration.failure_message());
                    report.push(step, StepStatus::Failed(e.to_string()), attempts);
                    if self.failure_policy == FailurePolicy::Abort {
                        halted = true;
                    }
                }
            }
        }

        info!(
            applied = report.applied_count(),
            failed = report.failed().len(),
            skipped = report.skipped_count(),
            "Schema migrations finished"
        );
        report
    }

    /// Apply one step, retrying transient errors up to the configured attempts.
    async fn apply(&self, migration: &Migration) -> (Result<(), BackendError>, u32) {
        let max_attempts = self.retry_policy.max_attempts.max(1);
        let backoff = ExponentialBackoff {
            current_interval: self.retry_policy.initial_interval,
            initial_interval: self.retry_policy.initial_interval,
            max_interval: self.retry_policy.max_interval,
            max_elapsed_time: None,
            ..Default::default()
        };
        let backend = &self.backend;
        let function = migration.rpc();
        let params = migration.params();
        let mut attempts = 0u32;

        let result = retry(backoff, || {
            attempts += 1;
            let attempt = attempts;
            let params = params.clone();
            async move {
                backend.rpc(function, params).await.map(|_| ()).map_err(|e| {
                    if attempt < max_attempts && e.is_transient() {
                        warn!(step = function, attempt, error = %e, "Migration step failed, retrying");
                        backoff::Error::transient(e)
                    } else {
                        backoff::Error::permanent(e)
                    }
                })
            }
        })
        .await;

        (result, attempts)
    }
}
