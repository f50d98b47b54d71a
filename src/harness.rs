//! The test root and the execution engine.
//!
//! A [`Test`] owns an ordered sequence of [`Suite`]s and the run's mock
//! registry. Running walks the tree in declaration order on the calling
//! thread: suites in the order added, cases in the order added, fixtures
//! around each level. Nothing suspends, blocks, or reorders.

use crate::case::{CaseContext, CaseStatus, Fixture};
use crate::mock::MockHandle;
use crate::report::{self, ReportConfig};
use crate::suite::Suite;

/// Overall result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    AllPassed,
    HasFailures,
}

impl RunOutcome {
    pub fn is_failure(self) -> bool {
        self == RunOutcome::HasFailures
    }

    /// Process exit status for external automation: 0 when everything
    /// passed, 1 otherwise. The sole machine-readable contract.
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::AllPassed => 0,
            RunOutcome::HasFailures => 1,
        }
    }
}

/// Aggregate totals over the final tree, computed at reporting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub suites: usize,
    pub failed_suites: usize,
    pub cases: usize,
    pub failed_cases: usize,
}

/// The root of a test tree.
///
/// Owns every suite and case added to it, plus the mock registry whose
/// lifetime matches the test's: created here, dropped (with every remaining
/// scripted value) when the test is dropped.
///
/// # Examples
///
/// ```rust
/// use crucible::{ReportConfig, Suite, Test};
///
/// let mut test = Test::new("arithmetic");
/// let mut suite = Suite::new("addition");
/// suite.add_case("zero sum", Box::new(|ctx, _| {
///     ctx.int_eq(0, 2 + -2);
/// }));
/// test.add_suite(suite);
///
/// let outcome = test.run(&ReportConfig::plain());
/// assert!(!outcome.is_failure());
/// ```
pub struct Test {
    desc: String,
    suites: Vec<Suite>,
    setup: Option<Fixture>,
    teardown: Option<Fixture>,
    mocks: MockHandle,
}

impl Test {
    pub fn new(title: &str) -> Self {
        Self {
            desc: title.to_string(),
            suites: Vec::new(),
            setup: None,
            teardown: None,
            mocks: MockHandle::new(),
        }
    }

    /// Test with top-level setup/teardown run once around the whole run.
    pub fn with_fixtures(title: &str, setup: Option<Fixture>, teardown: Option<Fixture>) -> Self {
        Self {
            setup,
            teardown,
            ..Self::new(title)
        }
    }

    /// Handle on this test's mock registry. Mocked function bodies capture
    /// clones of it; all clones share the same state.
    pub fn mocks(&self) -> MockHandle {
        self.mocks.clone()
    }

    /// Append a suite. Suites run in the order they were added; the move
    /// means an added suite cannot receive further cases.
    pub fn add_suite(&mut self, suite: Suite) {
        self.suites.push(suite);
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn suite_count(&self) -> usize {
        self.suites.len()
    }

    pub fn case_count(&self) -> usize {
        self.suites.iter().map(Suite::case_count).sum()
    }

    pub fn suites(&self) -> impl Iterator<Item = &Suite> {
        self.suites.iter()
    }

    /// Run every suite and case in declaration order, printing a pass/fail
    /// line as each case completes.
    ///
    /// For each suite: setup once, each case (`before` → body → `after`,
    /// fixtures run even when the body latched the case `Failed`), teardown
    /// once. Fixture panics are not caught. The outcome is `HasFailures`
    /// iff at least one case anywhere ended `Failed`.
    pub fn run(&mut self, config: &ReportConfig) -> RunOutcome {
        report::print_header(&self.desc, config);

        if let Some(setup) = self.setup.as_mut() {
            setup();
        }

        let mocks = self.mocks.clone();
        for suite in &mut self.suites {
            suite.failed = 0;
            report::print_suite_heading(&suite.desc, config);

            if let Some(setup) = suite.setup.as_mut() {
                setup();
            }
            for case in &mut suite.cases {
                case.status = CaseStatus::Pending;

                if let Some(before) = case.before.as_mut() {
                    before();
                }
                let mut ctx = CaseContext::new(mocks.clone());
                (case.body)(&mut ctx, case.param.as_deref());
                if let Some(after) = case.after.as_mut() {
                    after();
                }

                case.status = match ctx.into_failure() {
                    Some(failure) => CaseStatus::Failed(failure),
                    None => CaseStatus::Passed,
                };
                if case.status.is_failed() {
                    suite.failed += 1;
                }
                report::print_case_line(case, config);
            }
            if let Some(teardown) = suite.teardown.as_mut() {
                teardown();
            }
        }

        if let Some(teardown) = self.teardown.as_mut() {
            teardown();
        }

        self.outcome()
    }

    /// Overall result derived from the final tree state.
    pub fn outcome(&self) -> RunOutcome {
        let any_failed = self
            .suites
            .iter()
            .any(|suite| suite.cases().any(|case| case.status().is_failed()));
        if any_failed {
            RunOutcome::HasFailures
        } else {
            RunOutcome::AllPassed
        }
    }

    /// Totals over the final tree, recomputed from the suites rather than
    /// maintained incrementally, so they always reflect the linked children.
    pub fn summary(&self) -> Summary {
        Summary {
            suites: self.suite_count(),
            failed_suites: self.suites.iter().filter(|s| s.failed_count() > 0).count(),
            cases: self.case_count(),
            failed_cases: self.suites.iter().map(Suite::failed_count).sum(),
        }
    }

    /// Print the summary block and the red/green banner.
    pub fn report(&self, config: &ReportConfig) {
        report::print_summary(&self.summary(), config);
    }
}
