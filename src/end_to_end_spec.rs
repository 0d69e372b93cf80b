use std::time::Duration;

use slog_scope::{info, warn};
use tokio::time::Instant;

use crate::cases::TestCase;
use crate::oracle::TransliterationOracle;
use crate::report::{CaseOutcome, RunResult, SuiteReport};

/// Suite-level tuning.
#[derive(Debug, Clone)]
pub struct SpecConfig {
    /// Wall-clock budget for the whole run. Once exceeded, remaining cases
    /// are reported as skipped, not failed.
    pub global_budget: Duration,
}

impl Default for SpecConfig {
    fn default() -> Self {
        Self {
            global_budget: Duration::from_secs(600),
        }
    }
}

/// The case runner: feeds every case to the oracle sequentially and
/// collects one [RunResult] per case.
///
/// Cases share a single oracle session, so execution is sequential; the
/// adapter re-navigates before each case, which keeps cases independent of
/// one another. An oracle failure is local to its case and never aborts
/// the suite.
pub struct Spec {
    oracle: Box<dyn TransliterationOracle>,
    cases: Vec<TestCase>,
    config: SpecConfig,
}

impl Spec {
    pub fn new(
        oracle: Box<dyn TransliterationOracle>,
        cases: Vec<TestCase>,
        config: SpecConfig,
    ) -> Self {
        Self {
            oracle,
            cases,
            config,
        }
    }

    pub async fn run(&mut self) -> SuiteReport {
        let started = Instant::now();
        let mut results = Vec::with_capacity(self.cases.len());

        for case in &self.cases {
            let remaining = self.config.global_budget.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                warn!("Global budget exhausted, skipping case"; "case" => case.id);
                results.push(RunResult {
                    case_id: case.id,
                    label: case.label,
                    category: case.category,
                    outcome: CaseOutcome::Skipped,
                    elapsed: Duration::ZERO,
                });
                continue;
            }

            info!("Running case"; "case" => case.id, "input" => case.input);
            let case_started = Instant::now();
            // The in-flight oracle call is bounded by what is left of the
            // budget: a hung interaction fails the case, it does not hang
            // the suite.
            let outcome =
                match tokio::time::timeout(remaining, self.oracle.transliterate(case.input)).await
                {
                    Ok(Ok(actual)) => {
                        if case.check.evaluate(&actual) {
                            CaseOutcome::Passed
                        } else {
                            CaseOutcome::AssertionMismatch {
                                expected: case.check.to_string(),
                                actual,
                            }
                        }
                    }
                    Ok(Err(error)) => CaseOutcome::OracleFailure(error),
                    Err(_) => CaseOutcome::BudgetExpired,
                };
            let elapsed = case_started.elapsed();

            match &outcome {
                CaseOutcome::Passed => {
                    info!("Case passed"; "case" => case.id, "elapsed" => ?elapsed)
                }
                CaseOutcome::AssertionMismatch { actual, .. } => {
                    warn!("Case failed"; "case" => case.id, "actual" => actual)
                }
                CaseOutcome::OracleFailure(error) => {
                    warn!("Oracle failure"; "case" => case.id, "error" => %error)
                }
                CaseOutcome::BudgetExpired => {
                    warn!("Global budget expired mid-case"; "case" => case.id, "elapsed" => ?elapsed)
                }
                CaseOutcome::Skipped => {}
            }

            results.push(RunResult {
                case_id: case.id,
                label: case.label,
                category: case.category,
                outcome,
                elapsed,
            });
        }

        if let Err(error) = self.oracle.close().await {
            warn!("Oracle teardown failed"; "error" => %error);
        }

        SuiteReport::new(results)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::cases::Category;
    use crate::oracle::OracleError;
    use crate::predicate::{Predicate, TAMIL};

    struct FakeOracle {
        responses: VecDeque<Result<String, OracleError>>,
        closed: Arc<AtomicBool>,
    }

    impl FakeOracle {
        fn scripted(responses: Vec<Result<String, OracleError>>) -> Self {
            Self {
                responses: responses.into(),
                closed: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    #[async_trait]
    impl TransliterationOracle for FakeOracle {
        async fn transliterate(&mut self, _input: &str) -> Result<String, OracleError> {
            self.responses
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }

        async fn close(&mut self) -> Result<(), OracleError> {
            self.closed.store(true, Ordering::Relaxed);
            Ok(())
        }
    }

    fn case(id: &'static str, category: Category, check: Predicate) -> TestCase {
        TestCase {
            id,
            label: "scripted case",
            category,
            input: "some input",
            check,
        }
    }

    #[tokio::test]
    async fn all_cases_pass_when_the_oracle_answers_as_expected() {
        let oracle = FakeOracle::scripted(vec![
            Ok("வணக்கம் டா".to_string()),
            Ok(String::new()),
        ]);
        let closed = oracle.closed.clone();
        let cases = vec![
            case(
                "pos-x",
                Category::Positive,
                Predicate::exact_substring("வணக்கம்"),
            ),
            case("neg-x", Category::Negative, Predicate::rejected_by(TAMIL)),
        ];
        let mut spec = Spec::new(Box::new(oracle), cases, SpecConfig::default());

        let report = spec.run().await;

        assert!(report.fully_passed(), "{}", report.render());
        assert!(closed.load(Ordering::Relaxed), "oracle session was not released");
    }

    #[tokio::test]
    async fn an_oracle_failure_is_recorded_and_the_suite_continues() {
        let oracle = FakeOracle::scripted(vec![
            Ok("வணக்கம்".to_string()),
            Err(OracleError::SurfaceNotFound {
                surface: "second textarea".to_string(),
            }),
            Ok("நல்ல".to_string()),
        ]);
        let cases = vec![
            case("c-1", Category::Positive, Predicate::ScriptPresence(TAMIL)),
            case("c-2", Category::Positive, Predicate::ScriptPresence(TAMIL)),
            case("c-3", Category::Positive, Predicate::ScriptPresence(TAMIL)),
        ];
        let mut spec = Spec::new(Box::new(oracle), cases, SpecConfig::default());

        let report = spec.run().await;

        assert_eq!(3, report.results().len());
        assert!(report.results()[0].passed());
        assert!(report.results()[1].failed());
        assert!(report.results()[2].passed());
        assert_eq!(1, report.surface_not_found_count());
    }

    #[tokio::test]
    async fn a_mismatch_keeps_the_actual_output_for_the_report() {
        let oracle = FakeOracle::scripted(vec![Ok("vanakkam left as-is".to_string())]);
        let cases = vec![case(
            "pos-x",
            Category::Positive,
            Predicate::exact_substring("வணக்கம்"),
        )];
        let mut spec = Spec::new(Box::new(oracle), cases, SpecConfig::default());

        let report = spec.run().await;

        match &report.results()[0].outcome {
            CaseOutcome::AssertionMismatch { actual, .. } => {
                assert_eq!("vanakkam left as-is", actual)
            }
            other => panic!("expected a mismatch, got: {other:?}"),
        }
    }

    struct HangingOracle;

    #[async_trait]
    impl TransliterationOracle for HangingOracle {
        async fn transliterate(&mut self, _input: &str) -> Result<String, OracleError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn the_budget_interrupts_an_in_flight_case_and_skips_the_rest() {
        let cases = vec![
            case("c-1", Category::Positive, Predicate::EmptyOutput),
            case("c-2", Category::Negative, Predicate::EmptyOutput),
        ];
        let mut spec = Spec::new(
            Box::new(HangingOracle),
            cases,
            SpecConfig {
                global_budget: Duration::from_millis(100),
            },
        );

        let started = Instant::now();
        let report = spec.run().await;

        assert!(
            started.elapsed() < Duration::from_secs(5),
            "the suite waited out the oracle hang instead of honoring the budget: {:?}",
            started.elapsed()
        );
        assert!(matches!(
            report.results()[0].outcome,
            CaseOutcome::BudgetExpired
        ));
        assert!(report.results()[0].failed());
        assert!(report.results()[1].skipped());
    }

    #[tokio::test]
    async fn an_exhausted_budget_skips_remaining_cases() {
        let oracle = FakeOracle::scripted(vec![]);
        let cases = vec![
            case("c-1", Category::Positive, Predicate::EmptyOutput),
            case("c-2", Category::Negative, Predicate::EmptyOutput),
        ];
        let mut spec = Spec::new(
            Box::new(oracle),
            cases,
            SpecConfig {
                global_budget: Duration::ZERO,
            },
        );

        let report = spec.run().await;

        assert_eq!(2, report.skipped_count());
        assert_eq!(0, report.failed_count());
        assert!(!report.fully_passed());
    }
}
