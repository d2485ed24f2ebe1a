//! Slot Allocator Core - Rust Engine
//!
//! Scoring-and-selection engine that allocates discrete time slots
//! among resource providers, plus an autonomous simulation driver that
//! commits assignments over time with randomized, time-weighted
//! selection.
//!
//! # Architecture
//!
//! - **core**: The fixed slot grid
//! - **models**: Domain types (Provider, CommitmentStore, Weights, events)
//! - **scoring**: Availability score (freshness + license scarcity)
//! - **resolver**: Per-slot eligibility with deterministic tie-break
//! - **scheduler**: The timed three-stage simulation driver
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. The slot grid is fixed at startup; its order defines "earliness"
//! 2. A slot is consumed for all providers once any provider holds it
//! 3. All randomness is deterministic when seeded (replayable runs)
//! 4. At most one driver iteration is ever in flight

// Module declarations
pub mod core;
pub mod models;
pub mod resolver;
pub mod rng;
pub mod scheduler;
pub mod scoring;

// Re-exports for convenience
pub use self::core::slots::{SlotGrid, SlotId};
pub use models::{
    event::{Event, EventLog},
    provider::{Provider, ProviderId},
    store::CommitmentStore,
    weights::{Weights, WEIGHT_MAX, WEIGHT_MIN},
};
pub use resolver::{resolve, resolve_all, Assignment};
pub use rng::RngManager;
pub use scheduler::{
    DriverConfig, ProviderConfig, RunState, Scheduler, SchedulerConfig, SchedulerError, TickResult,
};
pub use scoring::{score, truncate2, LICENSE_DECAY_RATE};
