//! Mock dispatch engine: per-symbol value queues and the symbol registry.
//!
//! A *symbol* is a `(call-site name, role)` pair identifying one mockable
//! slot. Test bodies script values onto symbols before invoking the code
//! under test; the body of the mocked function fetches them back with
//! [`MockRegistry::dispatch`]. Queues are strictly FIFO unless a symbol is
//! put in sticky mode, in which case every dispatch returns the same value
//! until a later registration replaces it.
//!
//! Registry Invariant: there is exactly one registry per [`crate::Test`],
//! created with the test and dropped with it. Mocked function bodies hold
//! [`MockHandle`] clones of it; never construct a second registry for the
//! same run.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::{MockError, Role};
use crate::value::Value;

/// How many times a registered value is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Append the value to the queue `n` times; each dispatch consumes one.
    Times(u32),
    /// Sticky mode: every dispatch returns this value until a later
    /// registration replaces it.
    Always,
}

/// The scripted values attached to one symbol.
///
/// Either a FIFO queue of pending values, or a single sticky value. A sticky
/// registration discards whatever was queued; a queued registration clears
/// stickiness. Last registration wins, never a merge.
#[derive(Debug, Default)]
struct ScriptQueue {
    queue: VecDeque<Value>,
    sticky: Option<Value>,
}

impl ScriptQueue {
    fn push(&mut self, value: Value, repeat: Repeat) {
        match repeat {
            Repeat::Always => {
                self.queue.clear();
                self.sticky = Some(value);
            }
            Repeat::Times(count) => {
                self.sticky = None;
                for _ in 0..count {
                    self.queue.push_back(value.clone());
                }
            }
        }
    }

    /// Next value, or None when the queue is exhausted and not sticky.
    fn next(&mut self) -> Option<Value> {
        if let Some(v) = &self.sticky {
            return Some(v.clone());
        }
        self.queue.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.sticky.is_none() && self.queue.is_empty()
    }
}

/// Registry mapping each `(name, role)` symbol to its scripted values.
///
/// Symbols are created lazily on first registration. Lookup is exact string
/// equality on the name plus exact match on the role, so one call site can
/// script an output-argument value and a return value independently.
#[derive(Debug, Default)]
pub struct MockRegistry {
    symbols: HashMap<(String, Role), ScriptQueue>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `value` onto the `(name, role)` symbol.
    ///
    /// `Repeat::Times(n)` appends `n` copies to the symbol's queue and turns
    /// sticky mode off; `Repeat::Always` makes the symbol sticky and discards
    /// any queued-but-unconsumed values.
    pub fn register(&mut self, name: &str, role: Role, value: Value, repeat: Repeat) {
        self.symbols
            .entry((name.to_string(), role))
            .or_default()
            .push(value, repeat);
    }

    /// Fetch the next scripted value for the `(name, role)` symbol.
    ///
    /// Returns the sticky value if the symbol is sticky, otherwise pops the
    /// queue head.
    ///
    /// # Panics
    ///
    /// Panics if no symbol exists for `(name, role)`, or if the symbol's
    /// queue is exhausted and it is not sticky. Both are unrecoverable test
    /// script bugs; the panic message names the symbol and the panic
    /// location is the mocked call site.
    #[track_caller]
    pub fn dispatch(&mut self, name: &str, role: Role) -> Value {
        let Some(slot) = self.symbols.get_mut(&(name.to_string(), role)) else {
            panic!(
                "{}",
                MockError::UnknownSymbol {
                    name: name.to_string(),
                    role,
                }
            );
        };
        match slot.next() {
            Some(value) => value,
            None => panic!(
                "{}",
                MockError::Exhausted {
                    name: name.to_string(),
                    role,
                }
            ),
        }
    }

    /// Drop every symbol and every queued value.
    ///
    /// Call between independent runs that reuse a registry, so scripted
    /// values cannot leak from one run into the next.
    pub fn reset(&mut self) {
        self.symbols.clear();
    }

    /// True if `(name, role)` has at least one value left to serve.
    pub fn has_values(&self, name: &str, role: Role) -> bool {
        self.symbols
            .get(&(name.to_string(), role))
            .map(|slot| !slot.is_empty())
            .unwrap_or(false)
    }
}

/// Shared handle on a [`MockRegistry`].
///
/// The [`crate::Test`] owns the registry through one of these; mocked
/// function bodies capture clones. All clones see the same state, and the
/// registry (with every remaining queued value) is dropped when the last
/// handle goes away — in practice, when the owning test is dropped.
///
/// # Examples
///
/// ```rust
/// use crucible::mock::MockHandle;
/// use crucible::value::Value;
///
/// let mocks = MockHandle::new();
/// mocks.retv_return("fetch_count", Value::Int(7));
/// assert_eq!(mocks.retv("fetch_count"), Value::Int(7));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHandle {
    inner: Rc<RefCell<MockRegistry>>,
}

impl MockHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: &str, role: Role, value: Value, repeat: Repeat) {
        self.inner.borrow_mut().register(name, role, value, repeat);
    }

    /// Script one return value for `name`, served once.
    pub fn retv_return(&self, name: &str, value: Value) {
        self.register(name, Role::Retv, value, Repeat::Times(1));
    }

    /// Script one return value for `name`, served `count` times.
    pub fn retv_return_times(&self, name: &str, value: Value, count: u32) {
        self.register(name, Role::Retv, value, Repeat::Times(count));
    }

    /// Script one return value for `name`, served on every dispatch.
    pub fn retv_always_return(&self, name: &str, value: Value) {
        self.register(name, Role::Retv, value, Repeat::Always);
    }

    /// Script one output-argument value for `name`, served once.
    pub fn arg_return(&self, name: &str, value: Value) {
        self.register(name, Role::Arg, value, Repeat::Times(1));
    }

    /// Script one output-argument value for `name`, served `count` times.
    pub fn arg_return_times(&self, name: &str, value: Value, count: u32) {
        self.register(name, Role::Arg, value, Repeat::Times(count));
    }

    /// Script one output-argument value for `name`, served on every dispatch.
    pub fn arg_always_return(&self, name: &str, value: Value) {
        self.register(name, Role::Arg, value, Repeat::Always);
    }

    /// Fetch the next return value for `name`. Called from inside the body
    /// of the function being mocked.
    #[track_caller]
    pub fn retv(&self, name: &str) -> Value {
        self.inner.borrow_mut().dispatch(name, Role::Retv)
    }

    /// Fetch the next output-argument value for `name`. Called from inside
    /// the body of the function being mocked.
    #[track_caller]
    pub fn arg(&self, name: &str) -> Value {
        self.inner.borrow_mut().dispatch(name, Role::Arg)
    }

    pub fn reset(&self) {
        self.inner.borrow_mut().reset();
    }

    pub fn has_values(&self, name: &str, role: Role) -> bool {
        self.inner.borrow().has_values(name, role)
    }
}
