//! CPU scheduling algorithms and their simulation outcomes.
//!
//! # Algorithms
//!
//! | Algorithm | Preemptive | Context switch charged |
//! |-----------|-----------|------------------------|
//! | [`FirstComeFirstServed`] | no | after every non-final job |
//! | [`NonPreemptiveScheduler::priority`] | no | never |
//! | [`NonPreemptiveScheduler::shortest_job_first`] | no | never |
//! | [`RoundRobin`] | yes (fixed quantum) | on every change of process |
//!
//! Every algorithm clones the input before consuming it, so one process set
//! can be handed to all of them in turn. Runs take `&self` and build all
//! bookkeeping locally, so rerunning an instance never accumulates state.
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::Process;
//! use u_cpusched::scheduler::{AlgorithmKind, SimulationConfig};
//!
//! let processes = vec![
//!     Process::new("P1", 5),
//!     Process::new("P2", 3).with_arrival(2),
//!     Process::new("P3", 1).with_arrival(4),
//! ];
//! let outcome = AlgorithmKind::Fcfs.run(&processes, &SimulationConfig::default());
//! assert_eq!(outcome.timeline.end_time(), 9);
//! assert!((outcome.result.avg_waiting_time - 7.0 / 3.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod fcfs;
mod metrics;
mod non_preemptive;
mod round_robin;

pub use fcfs::FirstComeFirstServed;
pub use metrics::{extended_metrics, Completions, ProcessMetrics, SimulationResult};
pub use non_preemptive::NonPreemptiveScheduler;
pub use round_robin::RoundRobin;

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::dispatching::RuleEngine;
use crate::models::{Process, Time, Timeline};

/// Default round-robin quantum.
pub const DEFAULT_TIME_QUANTUM: Time = 5;

/// A CPU scheduling policy.
///
/// Implementations must not mutate `processes` and must be deterministic:
/// identical input yields an identical outcome.
pub trait SchedulingAlgorithm: Send + Sync {
    /// Short label (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Simulates the process set to completion.
    fn run(&self, processes: &[Process]) -> SimulationOutcome;
}

/// Everything one simulation run produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Schedule table.
    pub timeline: Timeline,
    /// Per-process timings, in input order.
    pub processes: Vec<ProcessMetrics>,
    /// Aggregate metrics.
    pub result: SimulationResult,
}

impl SimulationOutcome {
    /// Outcome of an empty process set: sentinel timeline, zeroed metrics.
    pub fn empty() -> Self {
        Self {
            timeline: Timeline::empty_workload(),
            ..Self::default()
        }
    }

    /// Derives metrics from final completion times and the canonical processes.
    pub fn from_completions(
        timeline: Timeline,
        processes: &[Process],
        completions: &Completions,
    ) -> Self {
        let metrics = ProcessMetrics::collect(processes, completions);
        let result = SimulationResult::calculate(processes, &metrics);
        Self {
            timeline,
            processes: metrics,
            result,
        }
    }

    /// Metrics for a single process.
    pub fn metrics_for(&self, process_id: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.process_id == process_id)
    }

    /// Latest completion time (0 if nothing ran).
    pub fn makespan(&self) -> Time {
        self.processes
            .iter()
            .map(|m| m.completion_time)
            .max()
            .unwrap_or(0)
    }
}

/// Run configuration shared by all algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Cost charged per context switch (≥ 0).
    pub context_switch_time: Time,
    /// Round-robin time slice (> 0). Ignored by the other algorithms.
    pub time_quantum: Time,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            context_switch_time: 0,
            time_quantum: DEFAULT_TIME_QUANTUM,
        }
    }
}

impl SimulationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the context-switch cost.
    pub fn with_context_switch(mut self, context_switch_time: Time) -> Self {
        self.context_switch_time = context_switch_time;
        self
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, time_quantum: Time) -> Self {
        self.time_quantum = time_quantum;
        self
    }
}

/// The four simulated policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlgorithmKind {
    /// First-come-first-served.
    Fcfs,
    /// Non-preemptive priority.
    PriorityNonPreemptive,
    /// Non-preemptive shortest-job-first.
    SjfNonPreemptive,
    /// Preemptive round-robin.
    RoundRobin,
}

impl AlgorithmKind {
    /// All policies, in reporting order.
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::Fcfs,
        AlgorithmKind::PriorityNonPreemptive,
        AlgorithmKind::SjfNonPreemptive,
        AlgorithmKind::RoundRobin,
    ];

    /// Report label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::PriorityNonPreemptive => "Priority-NP",
            Self::SjfNonPreemptive => "SJF-NP",
            Self::RoundRobin => "RoundRobin",
        }
    }

    /// Instantiates the policy for `config`.
    ///
    /// The non-preemptive priority and SJF schedulers never charge
    /// context-switch time, so they ignore `config.context_switch_time`.
    pub fn build(self, config: &SimulationConfig) -> Box<dyn SchedulingAlgorithm> {
        match self {
            Self::Fcfs => Box::new(FirstComeFirstServed::new(config.context_switch_time)),
            Self::PriorityNonPreemptive => Box::new(NonPreemptiveScheduler::priority()),
            Self::SjfNonPreemptive => Box::new(NonPreemptiveScheduler::shortest_job_first()),
            Self::RoundRobin => Box::new(RoundRobin::new(
                config.time_quantum,
                config.context_switch_time,
            )),
        }
    }

    /// Builds the policy and runs it once.
    pub fn run(self, processes: &[Process], config: &SimulationConfig) -> SimulationOutcome {
        self.build(config).run(processes)
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Clones `processes` into admission order.
fn admission_queue(processes: &[Process], admission: &RuleEngine) -> VecDeque<Process> {
    let mut clones = processes.to_vec();
    admission.sort(&mut clones);
    clones.into()
}

/// Removes every leading process that has arrived by `now`.
///
/// `pending` must be sorted by arrival time.
fn take_arrived(pending: &mut VecDeque<Process>, now: Time) -> Vec<Process> {
    let count = pending.iter().take_while(|p| p.has_arrived(now)).count();
    pending.drain(..count).collect()
}
