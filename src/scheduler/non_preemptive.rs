//! Comparator-driven non-preemptive scheduler.
//!
//! Shared engine behind non-preemptive priority and shortest-job-first.
//!
//! # Algorithm
//!
//! 1. Clone the processes and sort them by the admission rules.
//! 2. Seed the ready pool with the first admitted process.
//! 3. Pop the best process by the selection rules; pad idle time if it has
//!    not arrived yet, then run its whole burst.
//! 4. Move every pending process that has arrived by the new clock into the
//!    ready pool.
//! 5. If the pool is empty but processes remain, admit the next one even
//!    though it has not arrived; step 3 then fast-forwards the clock.
//!
//! Selection ties are resolved by admission order. No context-switch time
//! is charged.
//!
//! # Complexity
//! O(n log n) over n processes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{admission_queue, take_arrived, Completions, SchedulingAlgorithm, SimulationOutcome};
use crate::dispatching::{rules, RuleEngine};
use crate::models::{Process, Time, Timeline};

/// Non-preemptive scheduler parameterized by two orderings.
///
/// # Example
/// ```
/// use u_cpusched::models::Process;
/// use u_cpusched::scheduler::{NonPreemptiveScheduler, SchedulingAlgorithm};
///
/// let processes = vec![
///     Process::new("P1", 5),
///     Process::new("P2", 3).with_arrival(2),
///     Process::new("P3", 1).with_arrival(4),
/// ];
/// let outcome = NonPreemptiveScheduler::shortest_job_first().run(&processes);
/// let order: Vec<_> = outcome.timeline.entries().iter().filter_map(|e| e.process_id()).collect();
/// assert_eq!(order, vec!["P1", "P3", "P2"]);
/// ```
#[derive(Debug, Clone)]
pub struct NonPreemptiveScheduler {
    name: &'static str,
    admission: RuleEngine,
    selection: RuleEngine,
}

impl NonPreemptiveScheduler {
    /// Creates a scheduler from an admission ordering and a selection ordering.
    ///
    /// `admission` must order by arrival time first; pending processes are
    /// drained from its front as the clock passes their arrival.
    pub fn new(name: &'static str, admission: RuleEngine, selection: RuleEngine) -> Self {
        Self {
            name,
            admission,
            selection,
        }
    }

    /// Non-preemptive priority: lowest priority number among arrived processes.
    ///
    /// Equal arrivals are admitted by priority.
    pub fn priority() -> Self {
        Self::new(
            "Priority-NP",
            RuleEngine::new()
                .with_rule(rules::ArrivalOrder)
                .with_tie_breaker(rules::HighestPriority),
            RuleEngine::new().with_rule(rules::HighestPriority),
        )
    }

    /// Non-preemptive SJF: shortest burst among arrived processes.
    ///
    /// Equal arrivals are admitted by burst time.
    pub fn shortest_job_first() -> Self {
        Self::new(
            "SJF-NP",
            RuleEngine::new()
                .with_rule(rules::ArrivalOrder)
                .with_tie_breaker(rules::ShortestBurst),
            RuleEngine::new().with_rule(rules::ShortestBurst),
        )
    }
}

impl SchedulingAlgorithm for NonPreemptiveScheduler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(&self, processes: &[Process]) -> SimulationOutcome {
        let mut pending = admission_queue(processes, &self.admission);
        let Some(first) = pending.pop_front() else {
            return SimulationOutcome::empty();
        };

        let mut ready = ReadyPool::new(&self.selection);
        ready.push(first);

        let mut timeline = Timeline::new();
        let mut completions = Completions::with_capacity(processes.len());
        let mut clock: Time = 0;

        while let Some(current) = ready.pop() {
            if current.arrival_time > clock {
                timeline.push_idle(clock, current.arrival_time);
                clock = current.arrival_time;
            }

            let end = clock + current.burst_time;
            timeline.push_run(&current.id, clock, end);
            clock = end;
            completions.insert(current.id, clock);

            for process in take_arrived(&mut pending, clock) {
                ready.push(process);
            }

            // Nothing ready yet: admit the next arrival so the clock catches up.
            if ready.is_empty() {
                if let Some(next) = pending.pop_front() {
                    ready.push(next);
                }
            }
        }

        let outcome = SimulationOutcome::from_completions(timeline, processes, &completions);
        log::debug!(
            "{}: {} processes, makespan {}",
            self.name,
            processes.len(),
            outcome.makespan()
        );
        outcome
    }
}

/// Ready processes ordered by the selection rules, then admission sequence.
struct ReadyPool<'e> {
    heap: BinaryHeap<Candidate<'e>>,
    selection: &'e RuleEngine,
    next_seq: usize,
}

impl<'e> ReadyPool<'e> {
    fn new(selection: &'e RuleEngine) -> Self {
        Self {
            heap: BinaryHeap::new(),
            selection,
            next_seq: 0,
        }
    }

    fn push(&mut self, process: Process) {
        self.heap.push(Candidate {
            seq: self.next_seq,
            process,
            selection: self.selection,
        });
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<Process> {
        self.heap.pop().map(|c| c.process)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

struct Candidate<'e> {
    seq: usize,
    process: Process,
    selection: &'e RuleEngine,
}

impl Ord for Candidate<'_> {
    // BinaryHeap pops the greatest; the process dispatched first must be greatest.
    fn cmp(&self, other: &Self) -> Ordering {
        self.selection
            .compare(&other.process, &self.process)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

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

    fn order(outcome: &SimulationOutcome) -> Vec<&str> {
        outcome
            .timeline
            .entries()
            .iter()
            .filter_map(|e| e.process_id())
            .collect()
    }

    #[test]
    fn test_sjf_picks_shortest_arrived() {
        let outcome = NonPreemptiveScheduler::shortest_job_first().run(&example());
        assert_eq!(order(&outcome), vec!["P1", "P3", "P2"]);
        assert_eq!(outcome.metrics_for("P3").unwrap().completion_time, 6);
        assert_eq!(outcome.metrics_for("P2").unwrap().completion_time, 9);
        // TAT 5 + 7 + 2, WT 0 + 4 + 1
        assert!((outcome.result.avg_turnaround_time - 14.0 / 3.0).abs() < 1e-10);
        assert!((outcome.result.avg_waiting_time - 5.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_priority_picks_lowest_number() {
        let processes = vec![
            Process::new("P1", 5).with_priority(3),
            Process::new("P2", 3).with_arrival(1).with_priority(2),
            Process::new("P3", 1).with_arrival(2).with_priority(1),
        ];
        let outcome = NonPreemptiveScheduler::priority().run(&processes);
        // P1 is not preempted; P3 beats P2 once both are ready.
        assert_eq!(order(&outcome), vec!["P1", "P3", "P2"]);
        assert_eq!(outcome.metrics_for("P2").unwrap().waiting_time, 5);
    }

    #[test]
    fn test_equal_arrivals_admitted_by_rule() {
        let processes = vec![
            Process::new("slow", 9).with_priority(1),
            Process::new("fast", 1).with_priority(5),
        ];
        let sjf = NonPreemptiveScheduler::shortest_job_first().run(&processes);
        assert_eq!(order(&sjf), vec!["fast", "slow"]);

        let prio = NonPreemptiveScheduler::priority().run(&processes);
        assert_eq!(order(&prio), vec!["slow", "fast"]);
    }

    #[test]
    fn test_selection_ties_follow_admission() {
        let processes = vec![
            Process::new("first", 4),
            Process::new("b", 2).with_arrival(1),
            Process::new("a", 2).with_arrival(2),
        ];
        let outcome = NonPreemptiveScheduler::shortest_job_first().run(&processes);
        assert_eq!(order(&outcome), vec!["first", "b", "a"]);
    }

    #[test]
    fn test_idle_catch_up() {
        let processes = vec![Process::new("P1", 2), Process::new("P2", 3).with_arrival(10)];
        let outcome = NonPreemptiveScheduler::priority().run(&processes);
        assert_eq!(
            outcome.timeline.entries()[1],
            TimelineEntry::Idle { start: 2, end: 10 }
        );
        assert_eq!(outcome.timeline.end_time(), 13);
        assert!(outcome.timeline.is_contiguous());
        // busy 5 over span 13
        assert!((outcome.result.cpu_utilization - 500.0 / 13.0).abs() < 1e-10);
    }

    #[test]
    fn test_late_short_job_waits_for_running_one() {
        let processes = vec![Process::new("long", 10), Process::new("short", 1).with_arrival(1)];
        let outcome = NonPreemptiveScheduler::shortest_job_first().run(&processes);
        assert_eq!(order(&outcome), vec!["long", "short"]);
        assert_eq!(outcome.metrics_for("short").unwrap().waiting_time, 9);
    }

    #[test]
    fn test_single_and_empty() {
        let one = NonPreemptiveScheduler::priority().run(&[Process::new("P1", 3).with_arrival(2)]);
        assert_eq!(one.timeline.len(), 2); // idle + run
        assert_eq!(one.metrics_for("P1").unwrap().waiting_time, 0);

        let none = NonPreemptiveScheduler::shortest_job_first().run(&[]);
        assert!(none.timeline.is_empty_workload());
    }
}
