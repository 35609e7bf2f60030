// dbackupcli/src/utils/report.rs
use chrono::{DateTime, Local};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutcome {
    pub database: String,
    pub error: Option<String>,
}

/// Per-database results of a whole-instance run.
#[derive(Debug, Clone)]
pub struct RunReport {
    operation: &'static str,
    started_at: DateTime<Local>,
    outcomes: Vec<UnitOutcome>,
}

impl RunReport {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            started_at: Local::now(),
            outcomes: Vec::new(),
        }
    }

    pub fn record<E: Display>(&mut self, database: &str, result: &std::result::Result<(), E>) {
        self.outcomes.push(UnitOutcome {
            database: database.to_string(),
            error: result.as_ref().err().map(|e| e.to_string()),
        });
    }

    pub fn outcomes(&self) -> &[UnitOutcome] {
        &self.outcomes
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes().iter().filter(|o| o.error.is_none()).count()
    }

    pub fn failed(&self) -> Vec<&str> {
        self.outcomes()
            .iter()
            .filter(|o| o.error.is_some())
            .map(|o| o.database.as_str())
            .collect()
    }

    pub fn summary(&self) -> String {
        let elapsed = Local::now().signed_duration_since(self.started_at);
        let mut text = format!(
            "{} finished: {} of {} databases succeeded in {}s",
            self.operation,
            self.succeeded(),
            self.outcomes.len(),
            elapsed.num_seconds()
        );
        let failed = self.failed();
        if !failed.is_empty() {
            text.push_str(&format!("\nFailed: {}", failed.join(", ")));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_keeps_order_and_failures() {
        let mut report = RunReport::new("restoreAll");
        report.record::<String>("alpha", &Err("script exited with exit status: 1".into()));
        report.record::<String>("beta", &Ok(()));

        assert_eq!(report.outcomes().len(), 2);
        assert_eq!(report.outcomes()[0].database, "alpha");
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), vec!["alpha"]);

        let summary = report.summary();
        assert!(summary.starts_with("restoreAll finished: 1 of 2 databases succeeded"));
        assert!(summary.contains("Failed: alpha"));
    }

    #[test]
    fn test_empty_report() {
        let report = RunReport::new("backupAll");
        assert_eq!(report.succeeded(), 0);
        assert!(!report.summary().contains("Failed"));
    }
}
