//! # events
//!
//! Cooperative, single-threaded event plumbing for the UI layer.
//!
//! An [`EventHub`] fans a `(source, event)` pair out to registered hooks.
//! Permanent hooks run on every matching dispatch; one-shot hooks are
//! dropped after running, unless they return [`HookOutcome::NotReady`],
//! in which case the whole dispatch for that pair is re-queued after
//! [`REDISPATCH_DELAY`] and tried again, repeatedly, until no hook asks
//! for another round.
//!
//! [`Timers`] covers the rest of the scheduling bookkeeping: named timers
//! that re-arm after every run (a chain of one-shots, not a fixed-rate
//! interval) and plain one-shot delays.
//!
//! Neither type reads a clock. The driving loop passes its own
//! monotonically increasing `now` into `dispatch`/`pump`/`tick`, which
//! keeps everything deterministic and testable. Hooks and timer callbacks
//! receive the caller's context value, never the hub itself.

mod hub;
mod timers;

pub use hub::{EventHub, EventSource, HookOutcome, Permanence, REDISPATCH_DELAY, UiEvent};
pub use timers::Timers;
