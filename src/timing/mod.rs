//! Deterministic timer scheduling.
//!
//! Every timed behavior in the crate (frame ticks, transition commits, reveal
//! delays, hover cycles) goes through [`queue::TimerQueue`] instead of ambient
//! OS timers, so the whole engine can be driven by a simulated clock.

pub mod queue;
