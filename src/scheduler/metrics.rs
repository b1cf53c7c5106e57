//! Simulation performance metrics.
//!
//! Derives per-process and aggregate indicators from completion times
//! and the original (un-mutated) process descriptors.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - original burst |
//! | CPU Utilization | Σ burst / (max completion - min arrival) × 100 |
//! | Throughput | process count / (max completion - min arrival) |
//!
//! Averages always divide by the full process count. Utilization and
//! throughput stay at zero when the span is zero or nothing completed.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Process, Time};

/// Completion time per process ID.
pub type Completions = HashMap<String, Time>;

/// Derived timings for one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process ID.
    pub process_id: String,
    /// Arrival time.
    pub arrival_time: Time,
    /// Original burst time.
    pub burst_time: Time,
    /// Time the last slice of the process finished.
    pub completion_time: Time,
    /// completion - arrival.
    pub turnaround_time: Time,
    /// turnaround - burst.
    pub waiting_time: Time,
}

impl ProcessMetrics {
    /// Derives metrics for `process` completing at `completion_time`.
    ///
    /// `process` must carry its original burst time.
    pub fn new(process: &Process, completion_time: Time) -> Self {
        let turnaround_time = completion_time - process.arrival_time;
        Self {
            process_id: process.id.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - process.burst_time,
        }
    }

    /// Derives metrics for every process that has a completion entry,
    /// in the order of `processes`.
    pub fn collect(processes: &[Process], completions: &Completions) -> Vec<Self> {
        processes
            .iter()
            .filter_map(|p| completions.get(&p.id).map(|&c| Self::new(p, c)))
            .collect()
    }
}

/// Aggregate result of one simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Busy share of the simulation span, in percent.
    pub cpu_utilization: f64,
    /// Processes completed per time unit.
    pub throughput: f64,
}

impl SimulationResult {
    /// Computes aggregates over the canonical process set.
    ///
    /// # Arguments
    /// * `processes` - The original descriptors (un-mutated bursts).
    /// * `metrics` - Per-process metrics of the run.
    pub fn calculate(processes: &[Process], metrics: &[ProcessMetrics]) -> Self {
        if processes.is_empty() {
            return Self::default();
        }

        let count = processes.len() as f64;
        let total_waiting: Time = metrics.iter().map(|m| m.waiting_time).sum();
        let total_turnaround: Time = metrics.iter().map(|m| m.turnaround_time).sum();

        let mut result = Self {
            avg_waiting_time: total_waiting as f64 / count,
            avg_turnaround_time: total_turnaround as f64 / count,
            ..Self::default()
        };

        if let Some((utilization, throughput)) = extended_metrics(processes, metrics) {
            result.cpu_utilization = utilization;
            result.throughput = throughput;
        }
        result
    }
}

/// CPU utilization (%) and throughput over the simulation span.
///
/// Returns `None` if there are no processes, no completions, or the span
/// `max completion - min arrival` is zero.
pub fn extended_metrics(processes: &[Process], metrics: &[ProcessMetrics]) -> Option<(f64, f64)> {
    let min_arrival = processes.iter().map(|p| p.arrival_time).min()?;
    let max_completion = metrics.iter().map(|m| m.completion_time).max()?;

    let span = max_completion - min_arrival;
    if span == 0 {
        return None;
    }

    let busy: Time = processes.iter().map(|p| p.burst_time).sum();
    let utilization = busy as f64 / span as f64 * 100.0;
    let throughput = processes.len() as f64 / span as f64;
    Some((utilization, throughput))
}
