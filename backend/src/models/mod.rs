//! Domain models for the slot allocator

pub mod event;
pub mod provider;
pub mod store;
pub mod weights;

// Re-exports
pub use event::{Event, EventLog};
pub use provider::{Provider, ProviderId};
pub use store::CommitmentStore;
pub use weights::Weights;
