//! Preemptive round-robin scheduler.
//!
//! # Algorithm
//!
//! 1. Clone the processes, sort by arrival, seed the ready queue with the first.
//! 2. Dequeue the head; pad idle time if it has not arrived yet.
//! 3. Charge the context-switch cost if its ID differs from the previously
//!    dispatched one. Consecutive slices of the same process are free.
//! 4. Run `min(remaining, quantum)`. A process whose remaining burst fits in
//!    the quantum finishes and retires; otherwise its remaining burst drops
//!    by one quantum.
//! 5. Enqueue every process that arrived by the new clock, *then* requeue the
//!    preempted process behind them.
//! 6. If the queue is empty but processes remain, admit the next arrival.
//!
//! The completion time of each process is overwritten after every slice;
//! the value left after its final slice is authoritative. Turnaround and
//! waiting are then derived from the original descriptors.

use std::collections::VecDeque;

use super::{admission_queue, Completions, SchedulingAlgorithm, SimulationOutcome};
use crate::dispatching::{rules, RuleEngine};
use crate::models::{Process, Time, Timeline};

/// Round-robin with a fixed quantum.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    time_quantum: Time,
    context_switch_time: Time,
}

impl RoundRobin {
    /// Creates a round-robin scheduler.
    ///
    /// `time_quantum` must be positive; smaller values are raised to 1.
    pub fn new(time_quantum: Time, context_switch_time: Time) -> Self {
        debug_assert!(time_quantum > 0, "time quantum must be positive");
        Self {
            time_quantum: time_quantum.max(1),
            context_switch_time,
        }
    }

    /// Configured quantum.
    pub fn time_quantum(&self) -> Time {
        self.time_quantum
    }

    /// Configured context-switch cost.
    pub fn context_switch_time(&self) -> Time {
        self.context_switch_time
    }
}

/// Per-process bookkeeping during one run.
#[derive(Debug)]
struct SliceState {
    /// Working clone; `burst_time` holds the remaining demand.
    process: Process,
    /// End of the latest slice. Overwritten on every slice.
    completion_time: Option<Time>,
}

impl SliceState {
    fn record_slice(&mut self, end: Time) {
        self.completion_time = Some(end);
    }
}

impl SchedulingAlgorithm for RoundRobin {
    fn name(&self) -> &'static str {
        "RoundRobin"
    }

    fn run(&self, processes: &[Process]) -> SimulationOutcome {
        let admission = RuleEngine::new().with_rule(rules::ArrivalOrder);
        let mut states: Vec<SliceState> = admission_queue(processes, &admission)
            .into_iter()
            .map(|process| SliceState {
                process,
                completion_time: None,
            })
            .collect();
        if states.is_empty() {
            return SimulationOutcome::empty();
        }

        let mut timeline = Timeline::new();
        let mut ready: VecDeque<usize> = VecDeque::from([0]);
        let mut next_arrival = 1;
        let mut previous_id = String::new();
        let mut clock: Time = 0;

        while let Some(idx) = ready.pop_front() {
            let state = &mut states[idx];

            if state.process.arrival_time > clock {
                timeline.push_idle(clock, state.process.arrival_time);
                clock = state.process.arrival_time;
            }

            if !state.process.id.is_empty() && state.process.id != previous_id {
                timeline.push_context_switch(clock, clock + self.context_switch_time);
                clock += self.context_switch_time;
            }
            previous_id.clone_from(&state.process.id);

            let slice = state.process.burst_time.min(self.time_quantum);
            timeline.push_run(&state.process.id, clock, clock + slice);
            clock += slice;
            state.process.burst_time -= slice;
            state.record_slice(clock);
            let retired = state.process.burst_time == 0;

            while next_arrival < states.len() && states[next_arrival].process.has_arrived(clock) {
                ready.push_back(next_arrival);
                next_arrival += 1;
            }
            if !retired {
                ready.push_back(idx);
            }

            if ready.is_empty() && next_arrival < states.len() {
                ready.push_back(next_arrival);
                next_arrival += 1;
            }
        }

        let completions: Completions = states
            .into_iter()
            .filter_map(|s| s.completion_time.map(|t| (s.process.id, t)))
            .collect();

        let outcome = SimulationOutcome::from_completions(timeline, processes, &completions);
        log::debug!(
            "{}: {} processes, quantum {}, makespan {}",
            self.name(),
            processes.len(),
            self.time_quantum,
            outcome.makespan()
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimelineEntry;

    fn example() -> Vec<Process> {
        vec![
            Process::new("P1", 5),
            Process::new("P2", 3).with_arrival(2),
            Process::new("P3", 1).with_arrival(4),
        ]
    }

    fn run(id: &str, start: Time, end: Time) -> TimelineEntry {
        TimelineEntry::Run {
            process_id: id.to_string(),
            start,
            end,
        }
    }

    fn switch(start: Time, end: Time) -> TimelineEntry {
        TimelineEntry::ContextSwitch { start, end }
    }

    #[test]
    fn test_rr_interleaving() {
        let outcome = RoundRobin::new(2, 0).run(&example());

        assert_eq!(
            outcome.timeline.entries(),
            &[
                run("P1", 0, 2),
                run("P2", 2, 4),
                run("P1", 4, 6),
                run("P3", 6, 7),
                run("P2", 7, 8),
                run("P1", 8, 9),
            ]
        );
        assert_eq!(outcome.timeline.runs_for("P1").len(), 3);

        let completion = |id: &str| outcome.metrics_for(id).unwrap().completion_time;
        assert_eq!((completion("P1"), completion("P2"), completion("P3")), (9, 8, 7));
        // TAT 9 + 6 + 3, WT 4 + 3 + 2
        assert!((outcome.result.avg_turnaround_time - 6.0).abs() < 1e-10);
        assert!((outcome.result.avg_waiting_time - 3.0).abs() < 1e-10);
        assert!((outcome.result.throughput - 3.0 / 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_rr_switch_on_identity_change() {
        let outcome = RoundRobin::new(2, 1).run(&example());

        assert_eq!(
            outcome.timeline.entries(),
            &[
                switch(0, 1),
                run("P1", 1, 3),
                switch(3, 4),
                run("P2", 4, 6),
                switch(6, 7),
                run("P1", 7, 9),
                switch(9, 10),
                run("P3", 10, 11),
                switch(11, 12),
                run("P2", 12, 13),
                switch(13, 14),
                run("P1", 14, 15),
            ]
        );
        assert!(outcome.timeline.is_contiguous());
        assert_eq!(outcome.timeline.switch_time(), 6);
    }

    #[test]
    fn test_rr_no_switch_between_own_slices() {
        let outcome = RoundRobin::new(2, 1).run(&[Process::new("P1", 5)]);

        assert_eq!(
            outcome.timeline.entries(),
            &[switch(0, 1), run("P1", 1, 3), run("P1", 3, 5), run("P1", 5, 6)]
        );
        let m = outcome.metrics_for("P1").unwrap();
        assert_eq!(m.completion_time, 6);
        assert_eq!(m.waiting_time, 1);
    }

    #[test]
    fn test_rr_final_completion_overwrites_snapshots() {
        let outcome = RoundRobin::new(1, 0).run(&[Process::new("A", 3), Process::new("B", 1)]);
        // A: slices end at 1, 3, 4; only the last one counts.
        assert_eq!(outcome.metrics_for("A").unwrap().completion_time, 4);
        assert_eq!(outcome.metrics_for("B").unwrap().completion_time, 2);
    }

    #[test]
    fn test_rr_arrivals_queue_ahead_of_preempted() {
        // B arrives exactly when A's first slice ends.
        let processes = vec![Process::new("A", 4), Process::new("B", 2).with_arrival(2)];
        let outcome = RoundRobin::new(2, 0).run(&processes);
        let order: Vec<&str> = outcome
            .timeline
            .entries()
            .iter()
            .filter_map(|e| e.process_id())
            .collect();
        assert_eq!(order, vec!["A", "B", "A"]);
    }

    #[test]
    fn test_rr_idle_then_switch() {
        let processes = vec![Process::new("A", 1), Process::new("B", 1).with_arrival(5)];
        let outcome = RoundRobin::new(4, 1).run(&processes);
        assert_eq!(
            outcome.timeline.entries(),
            &[
                switch(0, 1),
                run("A", 1, 2),
                TimelineEntry::Idle { start: 2, end: 5 },
                switch(5, 6),
                run("B", 6, 7),
            ]
        );
    }

    #[test]
    fn test_rr_burst_equal_to_quantum_finishes() {
        let outcome = RoundRobin::new(3, 0).run(&[Process::new("A", 3)]);
        assert_eq!(outcome.timeline.len(), 1);
        assert_eq!(outcome.metrics_for("A").unwrap().turnaround_time, 3);
    }

    #[test]
    fn test_rr_rerun_does_not_accumulate() {
        let rr = RoundRobin::new(2, 1);
        let first = rr.run(&example());
        let second = rr.run(&example());
        assert_eq!(first, second);
        assert_eq!(second.timeline.len(), 12);
    }

    #[test]
    fn test_rr_accessors() {
        assert_eq!(RoundRobin::new(7, 0).time_quantum(), 7);
        assert_eq!(RoundRobin::new(7, 2).context_switch_time(), 2);
    }
}
