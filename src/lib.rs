//! Crucible: a minimal unit-testing and call-mocking harness for
//! sequential, single-threaded test programs.
//!
//! A test program declares a [`Test`], adds [`Suite`]s of cases to it,
//! optionally scripts values onto mocked call sites through the test's
//! [`mock::MockHandle`], then runs the tree in declaration order and exits
//! with a status code reflecting the overall result.
//!
//! ```text
//!      A logical Test
//!            |
//!       +-----------+
//!      TS-1   ...  TS-N
//!       |           |
//!  +-------+    +-------+
//!  TC-1  TC-N   TC-1  TC-N
//! ```
//!
//! # Example
//!
//! ```rust
//! use crucible::{ReportConfig, Suite, Test};
//!
//! let mut test = Test::new("calculator");
//! let mut suite = Suite::new("addition");
//! suite.add_case("identity", Box::new(|ctx, _| {
//!     ctx.int_eq(5, 5 + 0);
//! }));
//! test.add_suite(suite);
//!
//! let config = ReportConfig::plain();
//! let outcome = test.run(&config);
//! test.report(&config);
//! assert_eq!(outcome.exit_code(), 0);
//! ```

pub use crate::case::{CaseBody, CaseContext, CaseStatus, Failure, FailureSite, Fixture};
pub use crate::error::{MockError, Role};
pub use crate::harness::{RunOutcome, Summary, Test};
pub use crate::mock::{MockHandle, Repeat};
pub use crate::report::ReportConfig;
pub use crate::suite::Suite;
pub use crate::value::Value;

pub mod case;
pub mod error;
pub mod harness;
pub mod mock;
pub mod report;
pub mod suite;
pub mod value;
