//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm. All randomness in the driver's
//! sampling stages goes through this module, so a fixed seed replays an
//! entire simulation exactly; production runs seed from the clock.

mod xorshift;

pub use xorshift::RngManager;
