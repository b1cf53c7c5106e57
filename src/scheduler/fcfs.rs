//! First-come-first-served scheduler.
//!
//! # Algorithm
//!
//! 1. Clone the processes and sort them by arrival time (stable).
//! 2. Take them in that order. If the CPU gets ahead of an arrival, record
//!    an idle interval and jump the clock forward.
//! 3. Run each burst to completion in a single interval.
//! 4. If the context-switch cost is nonzero and a process remains, charge
//!    it immediately after the completion, before the next arrival check.
//!
//! Admission order and execution order coincide, so the generic
//! comparator-driven engine is not used here.

use std::collections::VecDeque;

use super::{admission_queue, Completions, SchedulingAlgorithm, SimulationOutcome};
use crate::dispatching::{rules, RuleEngine};
use crate::models::{Process, Time, Timeline};

/// First-come-first-served (non-preemptive).
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstComeFirstServed {
    context_switch_time: Time,
}

impl FirstComeFirstServed {
    /// Creates a scheduler charging `context_switch_time` between jobs.
    pub fn new(context_switch_time: Time) -> Self {
        Self {
            context_switch_time,
        }
    }

    /// Configured context-switch cost.
    pub fn context_switch_time(&self) -> Time {
        self.context_switch_time
    }
}

impl SchedulingAlgorithm for FirstComeFirstServed {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn run(&self, processes: &[Process]) -> SimulationOutcome {
        let admission = RuleEngine::new().with_rule(rules::ArrivalOrder);
        let mut queue: VecDeque<Process> = admission_queue(processes, &admission);
        if queue.is_empty() {
            return SimulationOutcome::empty();
        }

        let mut timeline = Timeline::new();
        let mut completions = Completions::with_capacity(queue.len());
        let mut clock: Time = 0;

        while let Some(current) = queue.pop_front() {
            if current.arrival_time > clock {
                timeline.push_idle(clock, current.arrival_time);
                clock = current.arrival_time;
            }

            let end = clock + current.burst_time;
            timeline.push_run(&current.id, clock, end);
            clock = end;
            completions.insert(current.id, clock);

            if self.context_switch_time > 0 && !queue.is_empty() {
                timeline.push_context_switch(clock, clock + self.context_switch_time);
                clock += self.context_switch_time;
            }
        }

        let outcome = SimulationOutcome::from_completions(timeline, processes, &completions);
        log::debug!(
            "{}: {} processes, makespan {}",
            self.name(),
            processes.len(),
            outcome.makespan()
        );
        outcome
    }
}
