//! Sequential suite runner and its report

use super::{OwnershipCheck, StateTransitionCheck, TestCase, TestContext};
use crate::error::{format_error, format_error_for_logging};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Ordered list of cases. Cases run one after another in this order.
pub struct Suite {
    cases: Vec<Box<dyn TestCase>>,
}

impl Suite {
    /// Empty suite
    pub fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Append a case
    pub fn with_case(mut self, case: impl TestCase + 'static) -> Self {
        self.cases.push(Box::new(case));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Keep only the named cases, preserving suite order.
    /// An empty list keeps everything.
    pub fn filter(self, names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Ok(self);
        }

        let known = self.names();
        if let Some(unknown) = names.iter().find(|n| !known.contains(&n.as_str())) {
            return Err(Error::config(
                "case",
                format!("Unknown case '{}' (available: {})", unknown, known.join(", ")),
            ));
        }

        let cases = self
            .cases
            .into_iter()
            .filter(|c| names.iter().any(|n| n == c.name()))
            .collect();
        Ok(Self { cases })
    }

    /// Run every case against `ctx`. A failing case does not stop the run.
    pub async fn run(&self, ctx: &TestContext) -> Report {
        let mut report = Report::started();

        for case in &self.cases {
            let name = case.name().to_string();
            info!("Running '{}'", name);
            let start = Instant::now();

            let outcome = match case.run(ctx).await {
                Ok(()) => {
                    info!("'{}' passed", name);
                    CaseOutcome::Passed
                }
                Err(e) => {
                    error!("'{}' failed: {}", name, format_error_for_logging(&e));
                    CaseOutcome::failed(&e)
                }
            };

            report.cases.push(CaseReport {
                name,
                outcome,
                duration_ms: duration_ms(start.elapsed()),
            });
        }

        report.finished_at = Some(Utc::now());
        report
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

impl Default for Suite {
    /// Ownership check, then the state transition
    fn default() -> Self {
        Self::new()
            .with_case(OwnershipCheck)
            .with_case(StateTransitionCheck::default())
    }
}

impl std::fmt::Debug for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suite").field("cases", &self.names()).finish()
    }
}

/// Result of one case
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CaseOutcome {
    Passed,
    Failed { error: String, category: String },
}

impl CaseOutcome {
    pub fn failed(error: &Error) -> Self {
        CaseOutcome::Failed {
            error: format_error(error),
            category: error.category().to_string(),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub name: String,
    #[serde(flatten)]
    pub outcome: CaseOutcome,
    pub duration_ms: u64,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Set when setup failed and no case ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_error: Option<String>,
    pub cases: Vec<CaseReport>,
}

impl Report {
    fn started() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            setup_error: None,
            cases: Vec::new(),
        }
    }

    /// Report for a run whose setup failed
    pub fn setup_failed(error: &Error) -> Self {
        let mut report = Self::started();
        report.setup_error = Some(format_error(error));
        report.finished_at = Some(report.started_at);
        report
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    /// True when setup succeeded and every case passed
    pub fn success(&self) -> bool {
        self.setup_error.is_none() && self.failed() == 0
    }

    /// Process exit code for this report
    pub fn exit_code(&self) -> i32 {
        if self.success() { 0 } else { 1 }
    }

    /// Plain-text summary, one line per case
    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();

        if let Some(setup_error) = &self.setup_error {
            lines.push(format!("SETUP FAILED: {}", setup_error));
        }

        for case in &self.cases {
            match &case.outcome {
                CaseOutcome::Passed => {
                    lines.push(format!("PASS {} ({} ms)", case.name, case.duration_ms))
                }
                CaseOutcome::Failed { error, .. } => lines.push(format!(
                    "FAIL {} ({} ms): {}",
                    case.name, case.duration_ms, error
                )),
            }
        }

        lines.push(String::new());
        lines.push(format!("{} passed, {} failed", self.passed(), self.failed()));
        lines.join("\n")
    }
}
