use std::fmt::Write;
use std::time::Duration;

use crate::cases::Category;
use crate::oracle::OracleError;

/// More than this many `SurfaceNotFound` failures is a systemic signal:
/// the oracle page structure has probably changed.
const SURFACE_FAILURE_SYSTEMIC_THRESHOLD: usize = 3;

/// How a single case ended.
#[derive(Debug)]
pub enum CaseOutcome {
    Passed,
    /// The oracle answered but the case's predicate evaluated false.
    AssertionMismatch { expected: String, actual: String },
    /// The oracle interaction itself failed.
    OracleFailure(OracleError),
    /// The global suite budget expired while the case was in flight.
    BudgetExpired,
    /// The global suite budget was exhausted before the case ran.
    Skipped,
}

/// The record produced for each executed (or skipped) case.
#[derive(Debug)]
pub struct RunResult {
    pub case_id: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub outcome: CaseOutcome,
    pub elapsed: Duration,
}

impl RunResult {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(
            self.outcome,
            CaseOutcome::AssertionMismatch { .. }
                | CaseOutcome::OracleFailure(_)
                | CaseOutcome::BudgetExpired
        )
    }

    pub fn skipped(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Skipped)
    }
}

/// Aggregate of a full suite run.
#[derive(Debug)]
pub struct SuiteReport {
    results: Vec<RunResult>,
}

impl SuiteReport {
    pub fn new(results: Vec<RunResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[RunResult] {
        &self.results
    }

    /// True only when every case ran and passed: a budget expiry that
    /// skipped cases is not a fully passing run.
    pub fn fully_passed(&self) -> bool {
        self.results.iter().all(RunResult::passed)
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.failed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results.iter().filter(|r| r.skipped()).count()
    }

    /// (passed, failed, skipped) counts for one category.
    pub fn counts(&self, category: Category) -> (usize, usize, usize) {
        let of_category = || self.results.iter().filter(move |r| r.category == category);

        (
            of_category().filter(|r| r.passed()).count(),
            of_category().filter(|r| r.failed()).count(),
            of_category().filter(|r| r.skipped()).count(),
        )
    }

    pub fn surface_not_found_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    CaseOutcome::OracleFailure(OracleError::SurfaceNotFound { .. })
                )
            })
            .count()
    }

    /// Flag raised when so many cases lost the oracle surface that the
    /// failures are unlikely to be about the inputs.
    pub fn has_systemic_surface_failures(&self) -> bool {
        self.surface_not_found_count() > SURFACE_FAILURE_SYSTEMIC_THRESHOLD
    }

    /// Human readable pass/fail summary: one line per case, aggregates per
    /// category, failing cases with actual vs. expected.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:-^80}", "");
        let _ = writeln!(out, "{:^80}", "TANGLISH TRANSLITERATION SUITE");
        let _ = writeln!(out, "{:-^80}", "");

        for result in &self.results {
            let verdict = match &result.outcome {
                CaseOutcome::Passed => "PASS",
                CaseOutcome::AssertionMismatch { .. } => "FAIL",
                CaseOutcome::OracleFailure(_) => "FAIL",
                CaseOutcome::BudgetExpired => "FAIL",
                CaseOutcome::Skipped => "SKIP",
            };
            let _ = writeln!(
                out,
                "{verdict}  {:8} {:40} ({:>6}ms)",
                result.case_id,
                result.label,
                result.elapsed.as_millis()
            );
        }

        let _ = writeln!(out, "{:-^80}", "");
        for category in [Category::Positive, Category::Negative] {
            let (passed, failed, skipped) = self.counts(category);
            let _ = writeln!(
                out,
                "{category:?}: {passed} passed, {failed} failed, {skipped} skipped"
            );
        }

        let failing: Vec<&RunResult> = self.results.iter().filter(|r| r.failed()).collect();
        if !failing.is_empty() {
            let _ = writeln!(out, "{:-^80}", "");
            let _ = writeln!(out, "Failing cases:");
            for result in failing {
                match &result.outcome {
                    CaseOutcome::AssertionMismatch { expected, actual } => {
                        let _ = writeln!(
                            out,
                            "  {}: expected output that {expected}, got `{actual}`",
                            result.case_id
                        );
                    }
                    CaseOutcome::OracleFailure(error) => {
                        let _ = writeln!(out, "  {}: oracle failure: {error}", result.case_id);
                    }
                    CaseOutcome::BudgetExpired => {
                        let _ = writeln!(
                            out,
                            "  {}: global budget expired while the case was running",
                            result.case_id
                        );
                    }
                    _ => {}
                }
            }
        }

        if self.has_systemic_surface_failures() {
            let _ = writeln!(
                out,
                "WARNING: {} cases could not locate the oracle surfaces, the page \
                 structure has probably changed",
                self.surface_not_found_count()
            );
        }

        out
    }
}
