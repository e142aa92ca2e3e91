//! Outcome of a migration run.

/// Final state of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Applied,
    /// The last error returned for the step.
    Failed(String),
    /// Not attempted because an earlier step failed under `FailurePolicy::Abort`.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub name: String,
    pub status: StepStatus,
    /// Calls made for this step; zero when skipped.
    pub attempts: u32,
}

/// Per-step outcomes, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub steps: Vec<StepOutcome>,
}

impl MigrationReport {
    pub fn push(&mut self, name: &str, status: StepStatus, attempts: u32) {
        self.steps.push(StepOutcome {
            name: name.to_string(),
            status,
            attempts,
        });
    }

    /// True when every step was applied.
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|s| s.status == StepStatus::Applied)
    }

    pub fn applied_count(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Applied))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Skipped))
    }

    /// Steps that failed, with their last error.
    pub fn failed(&self) -> Vec<(&str, &str)> {
        self.steps
            .iter()
            .filter_map(|s| match &s.status {
                StepStatus::Failed(reason) => Some((s.name.as_str(), reason.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn step(&self, name: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.name == name)
    }

    fn count(&self, predicate: impl Fn(&StepStatus) -> bool) -> usize {
        self.steps.iter().filter(|s| predicate(&s.status)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_complete() {
        assert!(MigrationReport::default().is_complete());
    }

    #[test]
    fn test_counts_and_failures() {
        let mut report = MigrationReport::default();
        report.push("create_users_table", StepStatus::Applied, 1);
        report.push(
            "create_employees_table",
            StepStatus::Failed("HTTP error 500: boom".to_string()),
            3,
        );
        report.push("create_leaves_table", StepStatus::Skipped, 0);

        assert!(!report.is_complete());
        assert_eq!(report.applied_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(
            report.failed(),
            vec![("create_employees_table", "HTTP error 500: boom")]
        );
        assert_eq!(report.step("create_employees_table").map(|s| s.attempts), Some(3));
        assert!(report.step("init_hr_tables").is_none());
    }
}
