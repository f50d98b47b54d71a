//! Test suites: ordered groups of cases with optional fixtures.

use std::any::Any;

use crate::case::{Case, CaseBody, CaseStatus, Fixture};

/// An ordered group of cases, run in declaration order, with optional
/// setup/teardown run once around the whole group.
///
/// A suite is built up with [`Suite::add_case`] and then moved into a
/// [`crate::Test`] with [`crate::Test::add_suite`]; the move is what
/// enforces the rule that a suite already added to a test cannot receive
/// further cases.
pub struct Suite {
    pub(crate) desc: String,
    pub(crate) cases: Vec<Case>,
    pub(crate) setup: Option<Fixture>,
    pub(crate) teardown: Option<Fixture>,
    pub(crate) failed: usize,
}

impl Suite {
    pub fn new(title: &str) -> Self {
        Self {
            desc: title.to_string(),
            cases: Vec::new(),
            setup: None,
            teardown: None,
            failed: 0,
        }
    }

    /// Suite with setup/teardown fixtures run once before the first case and
    /// once after the last.
    pub fn with_fixtures(title: &str, setup: Option<Fixture>, teardown: Option<Fixture>) -> Self {
        Self {
            setup,
            teardown,
            ..Self::new(title)
        }
    }

    /// Append a case. Cases run in the order they were added.
    pub fn add_case(&mut self, title: &str, body: CaseBody) {
        self.add_case_with(title, body, None, None, None);
    }

    /// Append a case with an opaque parameter and per-case fixtures.
    ///
    /// `param` is handed to the body on every run; `before`/`after` run
    /// around the body, even when the body latched the case `Failed`.
    pub fn add_case_with(
        &mut self,
        title: &str,
        body: CaseBody,
        param: Option<Box<dyn Any>>,
        before: Option<Fixture>,
        after: Option<Fixture>,
    ) {
        self.cases.push(Case {
            desc: title.to_string(),
            body,
            param,
            before,
            after,
            status: CaseStatus::default(),
        });
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Number of cases added to this suite.
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Number of cases whose terminal state is `Failed`. Zero before a run.
    pub fn failed_count(&self) -> usize {
        self.failed
    }

    pub fn cases(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter()
    }
}
