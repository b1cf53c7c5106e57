//! Discrete-event CPU scheduling simulator.
//!
//! Compares classical single-CPU scheduling policies over synthetic
//! workloads and reports per-process and aggregate performance metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`Process`, `Timeline`, `TimelineEntry`)
//! - **`dispatching`**: Composable ordering rules (FIFO, priority, SJF)
//! - **`scheduler`**: FCFS, non-preemptive priority/SJF, round-robin, and metrics
//! - **`workload`**: Random process sets (exponential arrivals, normal bursts)
//! - **`experiment`**: Replicated runs, 95% confidence intervals, CSV export
//! - **`validation`**: Input checks (duplicate IDs, bad bursts, bad parameters)
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
//! let config = SimulationConfig::new().with_quantum(2);
//!
//! for kind in AlgorithmKind::ALL {
//!     let outcome = kind.run(&processes, &config);
//!     assert!(outcome.timeline.is_contiguous());
//!     assert_eq!(outcome.processes.len(), 3);
//! }
//! ```
//!
//! # Concurrency
//!
//! Everything is synchronous and single-threaded. Algorithms never mutate
//! their input and hold no state between runs, so independent runs may be
//! spread across threads freely.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Law (2015), "Simulation Modeling and Analysis"

pub mod dispatching;
pub mod experiment;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;
