//! Test cases and the assertion latch.
//!
//! A case's outcome is a one-way latch: `Pending` until the body finishes,
//! `Failed` from the first failing assertion onward. Once latched, every
//! later assertion in the same body is a no-op, so the recorded site and
//! reason always belong to the *first* failure.

use std::any::Any;
use std::fmt;
use std::panic::Location;

use crate::mock::MockHandle;

/// A fixture: a plain callable with no parameters and no result, run around
/// a case or a whole suite/test. Fixtures have no failure-reporting
/// contract; a panicking fixture aborts the run.
pub type Fixture = Box<dyn FnMut()>;

/// The executable body of a case. Receives the assertion context and the
/// case's optional opaque parameter.
pub type CaseBody = Box<dyn FnMut(&mut CaseContext, Option<&dyn Any>)>;

/// Source location of a failing assertion, captured at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureSite {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl FailureSite {
    #[track_caller]
    fn caller() -> Self {
        let loc = Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }
}

impl fmt::Display for FailureSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// The first recorded failure of a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub site: FailureSite,
    pub reason: String,
}

/// Case outcome. `Pending` only while the case has not run to completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaseStatus {
    #[default]
    Pending,
    Passed,
    Failed(Failure),
}

impl CaseStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, CaseStatus::Failed(_))
    }
}

/// Assertion surface handed to a running case body.
///
/// All assertion methods share one contract: if the case is already latched
/// `Failed`, the call is a no-op; otherwise a failing condition latches the
/// case, recording the call site and a formatted reason. Successful
/// assertions never change state.
///
/// # Examples
///
/// ```rust
/// use crucible::case::CaseContext;
/// use crucible::mock::MockHandle;
///
/// let mut ctx = CaseContext::new(MockHandle::new());
/// ctx.int_eq(0, 2 + -2);
/// ctx.int_ne(1, 2 + -2);
/// assert!(ctx.failure().is_none());
/// ```
pub struct CaseContext {
    failure: Option<Failure>,
    mocks: MockHandle,
}

impl CaseContext {
    pub fn new(mocks: MockHandle) -> Self {
        Self {
            failure: None,
            mocks,
        }
    }

    /// Handle on the run's mock registry, for registrations inside the body.
    pub fn mocks(&self) -> MockHandle {
        self.mocks.clone()
    }

    /// The first recorded failure, if any assertion has failed so far.
    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    #[track_caller]
    fn latch(&mut self, reason: String) {
        if self.failure.is_none() {
            self.failure = Some(Failure {
                site: FailureSite::caller(),
                reason,
            });
        }
    }

    /// Assert that two integers are equal.
    #[track_caller]
    pub fn int_eq(&mut self, expected: i64, actual: i64) {
        if self.failure.is_some() {
            return;
        }
        if expected != actual {
            self.latch(format!("expected<{}> : actual<{}>", expected, actual));
        }
    }

    /// Assert that two integers differ.
    #[track_caller]
    pub fn int_ne(&mut self, expected: i64, actual: i64) {
        if self.failure.is_some() {
            return;
        }
        if expected == actual {
            self.latch(format!("not expected<{}> : actual<{}>", expected, actual));
        }
    }

    /// Assert that two optional strings are equal.
    ///
    /// Equal iff both are `None`, or both are `Some` with equal contents.
    #[track_caller]
    pub fn str_eq(&mut self, expected: Option<&str>, actual: Option<&str>) {
        if self.failure.is_some() {
            return;
        }
        if !str_values_equal(expected, actual) {
            self.latch(format!(
                "expected<{}> : actual<{}>",
                render(expected),
                render(actual)
            ));
        }
    }

    /// Assert that two optional strings differ. Exact negation of
    /// [`CaseContext::str_eq`].
    #[track_caller]
    pub fn str_ne(&mut self, expected: Option<&str>, actual: Option<&str>) {
        if self.failure.is_some() {
            return;
        }
        if str_values_equal(expected, actual) {
            self.latch(format!(
                "not expected<{}> : actual<{}>",
                render(expected),
                render(actual)
            ));
        }
    }

    /// Assert that a condition holds.
    #[track_caller]
    pub fn is_true(&mut self, condition: bool) {
        if self.failure.is_some() {
            return;
        }
        if !condition {
            self.latch(String::new());
        }
    }

    /// Assert an arbitrary condition, recording `msg` verbatim on failure.
    #[track_caller]
    pub fn check(&mut self, msg: &str, condition: bool) {
        if self.failure.is_some() {
            return;
        }
        if !condition {
            self.latch(msg.to_string());
        }
    }

    /// Latch the case unconditionally with `msg` as the reason.
    #[track_caller]
    pub fn fail(&mut self, msg: &str) {
        if self.failure.is_some() {
            return;
        }
        self.latch(msg.to_string());
    }

    pub(crate) fn into_failure(self) -> Option<Failure> {
        self.failure
    }
}

fn str_values_equal(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn render(s: Option<&str>) -> &str {
    s.unwrap_or("<absent>")
}

/// One test case: a description, an executable body, an optional opaque
/// parameter, optional before/after fixtures, and the latched outcome.
pub struct Case {
    pub(crate) desc: String,
    pub(crate) body: CaseBody,
    pub(crate) param: Option<Box<dyn Any>>,
    pub(crate) before: Option<Fixture>,
    pub(crate) after: Option<Fixture>,
    pub(crate) status: CaseStatus,
}

impl Case {
    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn status(&self) -> &CaseStatus {
        &self.status
    }
}
