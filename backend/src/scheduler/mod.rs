//! Simulation driver
//!
//! The `Scheduler` owns all engine state and runs the timed, three-stage
//! iteration state machine over the resolver's output.
//!
//! See `engine.rs` for the state machine, `sampling.rs` for the
//! percentile-band sampling it draws from.

pub mod engine;
pub mod sampling;

// Re-export main types for convenience
pub use engine::{
    DriverConfig, ProviderConfig, RunState, Scheduler, SchedulerConfig, SchedulerError, TickResult,
};
