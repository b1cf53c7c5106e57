//! Dispatching rules and rule engine for CPU scheduling.
//!
//! A dispatching rule is a total ordering over processes; the process that
//! orders first is dispatched first. Rules are composed in a [`RuleEngine`]
//! (primary rule, then tie-breakers) to express both the admission sort and
//! the ready-queue selection of the non-preemptive schedulers.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{rules, RuleEngine};
//! use u_cpusched::models::Process;
//!
//! // Earliest arrival first; equal arrivals by priority.
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ArrivalOrder)
//!     .with_tie_breaker(rules::HighestPriority);
//!
//! let mut procs = vec![
//!     Process::new("B", 3).with_priority(2),
//!     Process::new("A", 3).with_priority(1),
//! ];
//! engine.sort(&mut procs);
//! assert_eq!(procs[0].id, "A");
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::Process;
use std::cmp::Ordering;
use std::fmt::Debug;

/// A dispatching rule that orders processes.
///
/// # Ordering Convention
/// **`Ordering::Less` = dispatched earlier.** A rule returns `Less` when `a`
/// should run before `b`.
pub trait DispatchRule: Send + Sync + Debug {
    /// Rule name (e.g., "FIFO", "SJF").
    fn name(&self) -> &'static str;

    /// Compares two processes; `Less` means `a` is dispatched first.
    fn compare(&self, a: &Process, b: &Process) -> Ordering;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
