//! Domain models for CPU scheduling simulation.
//!
//! # Core Types
//!
//! - **Process**: A unit of CPU work (arrival, burst, priority)
//! - **Timeline**: Append-only record of run, idle, and context-switch intervals
//!
//! # Time Model
//!
//! All times are abstract integer ticks ([`Time`]) starting at t=0.
//! Intervals are half-open `[start, end)`.

mod process;
mod timeline;

pub use process::{Process, Time};
pub use timeline::{Timeline, TimelineEntry};
