//! Crucible error handling.
//!
//! Two disjoint classes exist in this crate. Test failures (expected-vs-actual
//! mismatches) are the harness's product: they are latched on the running
//! [`crate::case::Case`] and never surface as `Err`. The types here cover the
//! other class — framework/usage errors, which indicate a malformed test
//! script and are not recoverable.

use std::fmt;

use thiserror::Error;

/// Which slot of a mocked call site a scripted value feeds.
///
/// `Arg` delivers a value into an output parameter of the mocked function;
/// `Retv` delivers the function's return value. The two roles keep
/// independent queues even for the same symbol name, because a single call
/// may need both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Arg,
    Retv,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Arg => write!(f, "arg"),
            Role::Retv => write!(f, "retv"),
        }
    }
}

/// Unrecoverable mock-usage errors.
///
/// Both variants indicate a bug in the test script, not in the code under
/// test; dispatch renders the variant and panics rather than returning it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// A dispatch hit a symbol that no registration ever created.
    #[error("no scripted values for mocked symbol <{name}> (role: {role})")]
    UnknownSymbol { name: String, role: Role },

    /// The symbol exists but its queue is exhausted and it is not sticky.
    #[error("scripted values for mocked symbol <{name}> (role: {role}) are exhausted")]
    Exhausted { name: String, role: Role },
}
