//! Built-in dispatching rules.
//!
//! # Rules
//!
//! - **FIFO**: earliest arrival first
//! - **PRIORITY**: lowest priority number first
//! - **SJF**: shortest (remaining) burst first
//!
//! # Ordering Convention
//! All rules order the process to dispatch first as `Less`.

use std::cmp::Ordering;

use super::DispatchRule;
use crate::models::Process;

/// First In, First Out.
///
/// Orders by arrival time. Equal arrivals compare equal, leaving the
/// decision to the next rule or the engine's tie-breaker.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalOrder;

impl DispatchRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn compare(&self, a: &Process, b: &Process) -> Ordering {
        a.arrival_time.cmp(&b.arrival_time)
    }

    fn description(&self) -> &'static str {
        "First In, First Out"
    }
}

/// Highest priority first.
///
/// Lower priority numbers are more urgent.
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl DispatchRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn compare(&self, a: &Process, b: &Process) -> Ordering {
        a.priority.cmp(&b.priority)
    }

    fn description(&self) -> &'static str {
        "Highest Priority (lowest number) First"
    }
}

/// Shortest Job First.
///
/// Orders by the burst time carried on the descriptor, which is the
/// remaining demand for a partially executed clone.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl DispatchRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn compare(&self, a: &Process, b: &Process) -> Ordering {
        a.burst_time.cmp(&b.burst_time)
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_order() {
        let early = Process::new("A", 9).with_arrival(1);
        let late = Process::new("B", 1).with_arrival(4);
        assert_eq!(ArrivalOrder.compare(&early, &late), Ordering::Less);
        assert_eq!(ArrivalOrder.compare(&late, &early), Ordering::Greater);
        assert_eq!(ArrivalOrder.compare(&early, &early), Ordering::Equal);
    }

    #[test]
    fn test_highest_priority() {
        let urgent = Process::new("A", 5).with_priority(1);
        let lazy = Process::new("B", 5).with_priority(7);
        assert_eq!(HighestPriority.compare(&urgent, &lazy), Ordering::Less);
    }

    #[test]
    fn test_shortest_burst() {
        let short = Process::new("A", 2);
        let long = Process::new("B", 8);
        assert_eq!(ShortestBurst.compare(&short, &long), Ordering::Less);
        assert_eq!(ShortestBurst.compare(&long, &short), Ordering::Greater);
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(ArrivalOrder.name(), "FIFO");
        assert_eq!(HighestPriority.name(), "PRIORITY");
        assert_eq!(ShortestBurst.description(), "Shortest Job First");
    }
}
