//! Timeline (schedule table) model.
//!
//! A timeline is the ordered record of what the CPU did during a run:
//! which process executed over which interval, when it sat idle waiting for
//! an arrival, and when it paid context-switch overhead.
//!
//! # Invariants
//! - Entries are appended strictly forward and never revised.
//! - Intervals are half-open `[start, end)` and contiguous: the end of
//!   entry *n* equals the start of entry *n+1*.
//! - An empty workload yields exactly one [`TimelineEntry::EmptyWorkload`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Time;

/// One entry of the schedule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineEntry {
    /// No process had arrived.
    Idle { start: Time, end: Time },
    /// A process held the CPU.
    Run {
        process_id: String,
        start: Time,
        end: Time,
    },
    /// Context-switch overhead.
    ContextSwitch { start: Time, end: Time },
    /// Sentinel marking a run over an empty process set.
    EmptyWorkload,
}

impl TimelineEntry {
    /// Interval covered by this entry, `None` for the sentinel.
    pub fn span(&self) -> Option<(Time, Time)> {
        match *self {
            Self::Idle { start, end }
            | Self::Run { start, end, .. }
            | Self::ContextSwitch { start, end } => Some((start, end)),
            Self::EmptyWorkload => None,
        }
    }

    /// Length of the interval (0 for the sentinel).
    pub fn duration(&self) -> Time {
        self.span().map(|(s, e)| e - s).unwrap_or(0)
    }

    /// Process that ran during this entry, if any.
    pub fn process_id(&self) -> Option<&str> {
        match self {
            Self::Run { process_id, .. } => Some(process_id.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for TimelineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle { start, end } => write!(f, "[{start} <- -- -> {end}]"),
            Self::Run {
                process_id,
                start,
                end,
            } => write!(f, "[{start} <- {process_id} -> {end}]"),
            Self::ContextSwitch { start, end } => write!(f, "[{start} <- CS -> {end}]"),
            Self::EmptyWorkload => f.write_str("---- Empty Process Block ----"),
        }
    }
}

/// Ordered, append-only schedule table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline holding only the empty-workload sentinel.
    pub fn empty_workload() -> Self {
        Self {
            entries: vec![TimelineEntry::EmptyWorkload],
        }
    }

    /// Records an idle interval. Zero-length intervals are dropped.
    pub fn push_idle(&mut self, start: Time, end: Time) {
        if end > start {
            self.entries.push(TimelineEntry::Idle { start, end });
        }
    }

    /// Records an execution interval for `process_id`.
    pub fn push_run(&mut self, process_id: impl Into<String>, start: Time, end: Time) {
        self.entries.push(TimelineEntry::Run {
            process_id: process_id.into(),
            start,
            end,
        });
    }

    /// Records context-switch overhead. Zero-length intervals are dropped.
    pub fn push_context_switch(&mut self, start: Time, end: Time) {
        if end > start {
            self.entries.push(TimelineEntry::ContextSwitch { start, end });
        }
    }

    /// All entries in order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether this is the empty-workload sentinel timeline.
    pub fn is_empty_workload(&self) -> bool {
        matches!(self.entries.as_slice(), [TimelineEntry::EmptyWorkload])
    }

    /// Execution entries for a given process, in order.
    pub fn runs_for(&self, process_id: &str) -> Vec<&TimelineEntry> {
        self.entries
            .iter()
            .filter(|e| e.process_id() == Some(process_id))
            .collect()
    }

    /// Total time spent executing processes.
    pub fn busy_time(&self) -> Time {
        self.entries
            .iter()
            .filter(|e| matches!(e, TimelineEntry::Run { .. }))
            .map(TimelineEntry::duration)
            .sum()
    }

    /// Total time spent on context switches.
    pub fn switch_time(&self) -> Time {
        self.entries
            .iter()
            .filter(|e| matches!(e, TimelineEntry::ContextSwitch { .. }))
            .map(TimelineEntry::duration)
            .sum()
    }

    /// End of the last interval (0 if none).
    pub fn end_time(&self) -> Time {
        self.entries
            .iter()
            .rev()
            .find_map(TimelineEntry::span)
            .map(|(_, end)| end)
            .unwrap_or(0)
    }

    /// Whether every entry ends exactly where the next one starts.
    pub fn is_contiguous(&self) -> bool {
        let spans: Vec<(Time, Time)> = self.entries.iter().filter_map(|e| e.span()).collect();
        spans.windows(2).all(|w| w[0].1 == w[1].0)
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
