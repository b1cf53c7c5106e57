//! Process descriptor model.
//!
//! A process is the unit of CPU work being scheduled: it arrives at some
//! time, demands a CPU burst, and carries a priority used by priority-based
//! dispatching.
//!
//! # Ownership
//! The caller's process list is never mutated. Every algorithm clones the
//! descriptors it needs and consumes the clones (round-robin decrements the
//! cloned burst on each preemption).

use serde::{Deserialize, Serialize};

/// Simulation time unit.
///
/// Time is an abstract integer tick; the workload defines what one tick means.
pub type Time = i64;

/// A process (job) descriptor.
///
/// # Preconditions
/// `arrival_time >= 0` and `burst_time > 0`. The scheduling algorithms do not
/// re-check these; see [`crate::validation::validate_processes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier, stable across clones.
    pub id: String,
    /// Time at which the process becomes ready.
    pub arrival_time: Time,
    /// CPU time still required. Only ever decreases during a run.
    pub burst_time: Time,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
}

impl Process {
    /// Creates a process arriving at t=0 with priority 0.
    pub fn new(id: impl Into<String>, burst_time: Time) -> Self {
        Self {
            id: id.into(),
            arrival_time: 0,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival_time: Time) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the process has arrived by time `now`.
    #[inline]
    pub fn has_arrived(&self, now: Time) -> bool {
        self.arrival_time <= now
    }
}
