//! Scheduler engine
//!
//! Owns all engine state (grid, providers, weights, store, marker sets,
//! RNG, event log) and runs the iteration state machine:
//!
//! ```text
//! For each iteration:
//! 1. Guard: at most one iteration in flight, never overlap
//! 2. Clear NewlyCommitted and Pending marks
//! 3. H0 = resolve_all(store); empty => auto-stop
//! 4. Stage 1: sample the earliest 20% of H0
//! 5. Re-resolve against a working copy including stage 1
//! 6. Stage 2: sample the [0.2, 0.5) band of H1
//! 7. Stage 3: sample the [0.5, 0.7) band of H2 (only after stage 2)
//! 8. Mark selections Pending (immediately observable)
//! 9. After the reveal delay, commit one selection per commit step,
//!    a settle delay apart, moving each from Pending to NewlyCommitted
//! 10. Release the guard after the last commit
//! ```
//!
//! The collaborator drives the clock by calling `tick()` on its own
//! fixed period; all delays are expressed in ticks.
//!
//! # Determinism
//!
//! All randomness goes through the seeded `RngManager`. Same seed +
//! same command sequence = identical commits and event log.

use crate::core::slots::{SlotGrid, SlotId};
use crate::models::event::{Event, EventLog};
use crate::models::provider::{Provider, ProviderId};
use crate::models::store::CommitmentStore;
use crate::models::weights::Weights;
use crate::resolver::{self, Assignment};
use crate::rng::RngManager;
use crate::scheduler::sampling;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Earliest fraction sampled by stage 1
const STAGE_ONE_FRAC: f64 = 0.2;
/// Rank-fraction band sampled by stage 2
const STAGE_TWO_BAND: (f64, f64) = (0.2, 0.5);
/// Rank-fraction band sampled by stage 3
const STAGE_THREE_BAND: (f64, f64) = (0.5, 0.7);

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Providers competing for slots
    pub providers: Vec<ProviderConfig>,

    /// First hour of the scheduling window (inclusive)
    pub open_hour: u32,

    /// Last hour of the scheduling window (exclusive)
    pub close_hour: u32,

    /// Slot spacing in minutes
    pub step_minutes: u32,

    /// Freshness weight w1; w2 is its complement
    #[serde(default = "default_freshness_weight")]
    pub freshness_weight: f64,

    /// Driver timing and seeding
    #[serde(default)]
    pub driver: DriverConfig,
}

fn default_freshness_weight() -> f64 {
    0.5
}

/// Per-provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Unique provider identifier
    pub id: ProviderId,

    /// Name for the presentation layer
    pub display_name: String,

    /// License count (>= 1 expected)
    pub licenses: u32,
}

/// Driver timing configuration, all delays in ticks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Ticks between iteration starts
    pub iteration_period_ticks: usize,

    /// Ticks a selection stays pending before its commit sequence starts
    pub reveal_delay_ticks: usize,

    /// Ticks between successive commits of one iteration
    pub settle_delay_ticks: usize,

    /// RNG seed; `None` seeds from the system clock
    pub rng_seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            iteration_period_ticks: 10,
            reveal_delay_ticks: 3,
            settle_delay_ticks: 1,
            rng_seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Parse a configuration from a JSON scenario document
    pub fn from_json(json: &str) -> Result<Self, SchedulerError> {
        serde_json::from_str(json).map_err(|e| SchedulerError::InvalidConfig(e.to_string()))
    }
}

// ============================================================================
// Errors and result types
// ============================================================================

/// Scheduler error types
#[derive(Debug, Error, PartialEq)]
pub enum SchedulerError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Provider id not supplied at startup
    #[error("Unknown provider: {0}")]
    UnknownProvider(ProviderId),

    /// Slot id not part of the fixed grid
    #[error("Unknown slot: {0}")]
    UnknownSlot(SlotId),
}

/// Driver run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Not running; no iterations scheduled
    Idle,
    /// Iterations fire on the configured period
    Running,
    /// Iteration timer frozen; an in-flight iteration may still finish
    Paused,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Tick number
    pub tick: usize,

    /// Whether a new iteration passed its guard this tick
    pub iteration_started: bool,

    /// Assignments finalized into the store this tick
    pub committed: Vec<Assignment>,

    /// Run state after the tick
    pub run_state: RunState,
}

// ============================================================================
// In-flight iteration
// ============================================================================

/// Commit-phase progress of the iteration currently in flight
#[derive(Debug, Clone)]
enum CommitPhase {
    /// Selections are pending and visible; commits start at `until_tick`
    Reveal { until_tick: usize },
    /// Committing selection `next` no earlier than `at_tick`
    Commit { next: usize, at_tick: usize },
}

/// One iteration past its guard: sampled selections plus phase
#[derive(Debug, Clone)]
struct InFlightIteration {
    /// Stage-ordered selections (stage 1 first)
    selections: Vec<Assignment>,
    phase: CommitPhase,
}

// ============================================================================
// Scheduler
// ============================================================================

/// Main engine facade: scoring, resolution, manual control, and the
/// simulation driver.
///
/// Single logical writer: every mutation goes through `&mut self`, so
/// iteration steps and manual commands can never interleave.
///
/// # Example
/// ```
/// use slot_allocator_core_rs::{
///     DriverConfig, ProviderConfig, RunState, Scheduler, SchedulerConfig,
/// };
///
/// let config = SchedulerConfig {
///     providers: vec![
///         ProviderConfig { id: 3, display_name: "A".to_string(), licenses: 1 },
///         ProviderConfig { id: 7, display_name: "B".to_string(), licenses: 2 },
///     ],
///     open_hour: 9,
///     close_hour: 10,
///     step_minutes: 10,
///     freshness_weight: 0.5,
///     driver: DriverConfig { rng_seed: Some(42), ..Default::default() },
/// };
///
/// let mut scheduler = Scheduler::new(config).unwrap();
/// scheduler.start();
/// while scheduler.run_state() != RunState::Idle {
///     scheduler.tick();
/// }
/// assert!(scheduler.resolve_all().is_empty());
/// ```
pub struct Scheduler {
    /// Fixed slot sequence
    grid: SlotGrid,

    /// Providers in supplied order; the resolver sorts ties itself
    providers: Vec<Provider>,

    /// Current score weights
    weights: Weights,

    /// Authoritative commitments
    store: CommitmentStore,

    /// Driver run state
    run_state: RunState,

    /// Ticks elapsed since construction
    clock: usize,

    /// Tick the next iteration is due at (while Running)
    next_iteration_tick: usize,

    /// Ticks left until the next iteration, captured on pause
    paused_ticks_remaining: usize,

    /// Iteration currently past its guard, if any
    in_flight: Option<InFlightIteration>,

    /// Selections sampled but not yet committed this iteration
    pending: BTreeSet<(ProviderId, SlotId)>,

    /// Pairs committed during the most recently completed iteration
    newly_committed: BTreeSet<(ProviderId, SlotId)>,

    /// Deterministic RNG for band sampling
    rng: RngManager,

    /// Driver timing
    driver_config: DriverConfig,

    /// Event log (all engine events)
    event_log: EventLog,
}

impl Scheduler {
    /// Create a scheduler from configuration.
    ///
    /// Builds the slot grid once; providers and grid are immutable for
    /// the lifetime of the session.
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        Self::validate_config(&config)?;

        let grid = SlotGrid::generate(config.open_hour, config.close_hour, config.step_minutes);
        let providers: Vec<Provider> = config
            .providers
            .iter()
            .map(|pc| Provider::new(pc.id, pc.display_name.clone(), pc.licenses))
            .collect();

        let rng = match config.driver.rng_seed {
            Some(seed) => RngManager::new(seed),
            None => RngManager::from_entropy(),
        };

        Ok(Self {
            grid,
            providers,
            weights: Weights::new(config.freshness_weight),
            store: CommitmentStore::new(),
            run_state: RunState::Idle,
            clock: 0,
            next_iteration_tick: 0,
            paused_ticks_remaining: 0,
            in_flight: None,
            pending: BTreeSet::new(),
            newly_committed: BTreeSet::new(),
            rng,
            driver_config: config.driver,
            event_log: EventLog::new(),
        })
    }

    /// Validate configuration
    fn validate_config(config: &SchedulerConfig) -> Result<(), SchedulerError> {
        if config.providers.is_empty() {
            return Err(SchedulerError::InvalidConfig(
                "Must have at least one provider".to_string(),
            ));
        }

        let mut ids = BTreeSet::new();
        for provider in &config.providers {
            if !ids.insert(provider.id) {
                return Err(SchedulerError::InvalidConfig(format!(
                    "Duplicate provider ID: {}",
                    provider.id
                )));
            }
        }

        if config.open_hour >= config.close_hour {
            return Err(SchedulerError::InvalidConfig(
                "open_hour must be before close_hour".to_string(),
            ));
        }

        if config.step_minutes == 0 || config.step_minutes > 60 {
            return Err(SchedulerError::InvalidConfig(
                "step_minutes must be in 1..=60".to_string(),
            ));
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current tick number
    pub fn clock(&self) -> usize {
        self.clock
    }

    /// Driver run state
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// The fixed slot grid
    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// Providers in supplied order
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Current score weights
    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Authoritative commitment store
    pub fn store(&self) -> &CommitmentStore {
        &self.store
    }

    /// Selections sampled but not yet committed this iteration
    pub fn pending(&self) -> &BTreeSet<(ProviderId, SlotId)> {
        &self.pending
    }

    /// Pairs committed during the most recently completed iteration
    pub fn newly_committed(&self) -> &BTreeSet<(ProviderId, SlotId)> {
        &self.newly_committed
    }

    /// Event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Current availability score for one provider.
    ///
    /// Raw value; displays typically show it truncated via
    /// [`crate::scoring::truncate2`].
    pub fn score_of(&self, provider: ProviderId) -> Result<f64, SchedulerError> {
        let provider = self
            .provider(provider)
            .ok_or(SchedulerError::UnknownProvider(provider))?;
        Ok(crate::scoring::score(
            provider,
            &self.store,
            self.grid.len(),
            &self.weights,
        ))
    }

    /// Currently eligible provider for one slot
    pub fn resolve_slot(&self, slot: SlotId) -> Result<Option<ProviderId>, SchedulerError> {
        if !self.grid.contains(slot) {
            return Err(SchedulerError::UnknownSlot(slot));
        }
        Ok(resolver::resolve(
            slot,
            &self.providers,
            &self.store,
            self.grid.len(),
            &self.weights,
        ))
    }

    /// All currently eligible assignments, in the grid's time order
    pub fn resolve_all(&self) -> Vec<Assignment> {
        resolver::resolve_all(&self.grid, &self.providers, &self.store, &self.weights)
    }

    fn provider(&self, id: ProviderId) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id() == id)
    }

    // ========================================================================
    // Manual control
    // ========================================================================

    /// Manually flip one (provider, slot) commitment.
    ///
    /// Returns the new membership state. The only precondition is that
    /// both identifiers exist; flipping an already-committed pair back
    /// off is normal manual control.
    pub fn toggle(&mut self, provider: ProviderId, slot: SlotId) -> Result<bool, SchedulerError> {
        if self.provider(provider).is_none() {
            return Err(SchedulerError::UnknownProvider(provider));
        }
        if !self.grid.contains(slot) {
            return Err(SchedulerError::UnknownSlot(slot));
        }

        let committed = self.store.toggle(provider, slot);
        self.event_log.log(Event::ManualToggle {
            tick: self.clock,
            provider,
            slot,
            committed,
        });
        self.check_termination();
        Ok(committed)
    }

    /// Set the freshness weight w1 (clamped to [0.1, 0.9]).
    ///
    /// w2 becomes its complement and the store is cleared: existing
    /// commitments were made under score semantics that no longer hold.
    /// An in-flight iteration is aborted for the same reason.
    pub fn set_freshness_weight(&mut self, value: f64) {
        self.weights.set_w1(value);
        self.invalidate_commitments();
    }

    /// Set the scarcity weight w2 (clamped to [0.1, 0.9]); w1 becomes
    /// its complement. Clears the store like `set_freshness_weight`.
    pub fn set_scarcity_weight(&mut self, value: f64) {
        self.weights.set_w2(value);
        self.invalidate_commitments();
    }

    fn invalidate_commitments(&mut self) {
        self.store.clear();
        self.pending.clear();
        self.newly_committed.clear();
        self.in_flight = None;
        self.event_log.log(Event::WeightsChanged {
            tick: self.clock,
            freshness: self.weights.w1(),
            scarcity: self.weights.w2(),
        });
    }

    // ========================================================================
    // Driver commands
    // ========================================================================

    /// Start the driver. No-op unless Idle. The store is kept: manual
    /// commitments made before starting constrain the simulation.
    pub fn start(&mut self) {
        if self.run_state != RunState::Idle {
            return;
        }
        self.run_state = RunState::Running;
        self.next_iteration_tick = self.clock;
        self.event_log.log(Event::Started { tick: self.clock });
    }

    /// Pause the driver: freezes the iteration timer but lets an
    /// in-flight iteration finish its commit sequence.
    pub fn pause(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        self.run_state = RunState::Paused;
        self.paused_ticks_remaining = self.next_iteration_tick.saturating_sub(self.clock);
        self.event_log.log(Event::Paused { tick: self.clock });
    }

    /// Resume from Paused; the iteration timer continues where it froze
    pub fn resume(&mut self) {
        if self.run_state != RunState::Paused {
            return;
        }
        self.run_state = RunState::Running;
        self.next_iteration_tick = self.clock + self.paused_ticks_remaining;
        self.event_log.log(Event::Resumed { tick: self.clock });
    }

    /// Stop and reset: driver goes Idle, the store and both marker sets
    /// are cleared, and any in-flight iteration is abandoned.
    pub fn stop(&mut self) {
        self.run_state = RunState::Idle;
        self.store.clear();
        self.pending.clear();
        self.newly_committed.clear();
        self.in_flight = None;
        self.event_log.log(Event::Stopped { tick: self.clock });
    }

    // ========================================================================
    // Tick loop
    // ========================================================================

    /// Advance the engine by one tick.
    ///
    /// The collaborator calls this on its fixed timer period. An
    /// iteration past its guard keeps advancing even while paused, so a
    /// pause never tears a partial commit sequence; new iterations only
    /// begin while Running.
    pub fn tick(&mut self) -> TickResult {
        let tick = self.clock;
        let mut iteration_started = false;
        let mut committed = Vec::new();

        if self.in_flight.is_some() {
            committed = self.advance_in_flight(tick);
        } else if self.run_state == RunState::Running && tick >= self.next_iteration_tick {
            iteration_started = self.begin_iteration(tick);
        }

        self.clock += 1;
        TickResult {
            tick,
            iteration_started,
            committed,
            run_state: self.run_state,
        }
    }

    /// Run one iteration's sampling stages; returns whether the
    /// iteration passed its guard and selected anything.
    fn begin_iteration(&mut self, tick: usize) -> bool {
        // At-most-one-iteration-in-flight; never overlap.
        if self.in_flight.is_some() {
            return false;
        }
        self.next_iteration_tick = tick + self.driver_config.iteration_period_ticks;

        self.newly_committed.clear();
        self.pending.clear();

        let h0 = self.resolve_all();
        if h0.is_empty() {
            self.auto_stop(tick);
            return false;
        }
        self.event_log.log(Event::IterationStarted { tick });

        let mut selections = Vec::new();
        let mut working = self.store.clone();

        // Stage 1: earliest 20% of the current eligible assignments.
        let first = match sampling::sample_earliest(&h0, STAGE_ONE_FRAC, &mut self.rng) {
            Some(a) => a,
            None => return false,
        };
        selections.push(first);
        working.commit(first.provider, first.slot);

        // Stage 2 re-resolves against a state that already includes
        // stage 1's hypothetical commitment; stage 3 likewise includes
        // stages 1 and 2. This is what prevents double-claiming within
        // one iteration.
        let h1 = resolver::resolve_all(&self.grid, &self.providers, &working, &self.weights);
        if let Some(second) =
            sampling::sample_band(&h1, STAGE_TWO_BAND.0, STAGE_TWO_BAND.1, &mut self.rng)
        {
            selections.push(second);
            working.commit(second.provider, second.slot);

            // Stage 3 only runs when stage 2 selected.
            let h2 = resolver::resolve_all(&self.grid, &self.providers, &working, &self.weights);
            if let Some(third) =
                sampling::sample_band(&h2, STAGE_THREE_BAND.0, STAGE_THREE_BAND.1, &mut self.rng)
            {
                selections.push(third);
            }
        }

        for (index, selection) in selections.iter().enumerate() {
            self.pending.insert((selection.provider, selection.slot));
            self.event_log.log(Event::StageSelected {
                tick,
                stage: index as u8 + 1,
                provider: selection.provider,
                slot: selection.slot,
            });
        }

        self.in_flight = Some(InFlightIteration {
            selections,
            phase: CommitPhase::Reveal {
                until_tick: tick + self.driver_config.reveal_delay_ticks,
            },
        });
        true
    }

    /// Advance the in-flight iteration's reveal/commit phases by one
    /// tick, committing at most one selection.
    fn advance_in_flight(&mut self, tick: usize) -> Vec<Assignment> {
        let mut committed = Vec::new();
        let flight = match self.in_flight.clone() {
            Some(f) => f,
            None => return committed,
        };

        let mut phase = flight.phase;
        if let CommitPhase::Reveal { until_tick } = phase {
            if tick >= until_tick {
                phase = CommitPhase::Commit {
                    next: 0,
                    at_tick: tick,
                };
            }
        }

        if let CommitPhase::Commit { next, at_tick } = phase {
            if tick >= at_tick {
                let selection = flight.selections[next];
                if self.commit_selection(selection, tick) {
                    committed.push(selection);
                }

                if next + 1 < flight.selections.len() {
                    phase = CommitPhase::Commit {
                        next: next + 1,
                        at_tick: tick + self.driver_config.settle_delay_ticks,
                    };
                } else {
                    // Last commit: release the in-flight guard. If the
                    // sequence overran the period, re-anchor so the
                    // next iteration stays a full period away.
                    self.in_flight = None;
                    if tick >= self.next_iteration_tick {
                        self.next_iteration_tick =
                            tick + self.driver_config.iteration_period_ticks;
                    }
                    self.check_termination();
                    return committed;
                }
                self.check_termination();
                if self.in_flight.is_none() {
                    // Auto-stop fired mid-sequence; nothing left to do.
                    return committed;
                }
            }
        }

        if let Some(f) = self.in_flight.as_mut() {
            f.phase = phase;
        }
        committed
    }

    /// Finalize one pending selection into the store.
    ///
    /// Skips (and logs) the commit when a manual toggle handed the slot
    /// to a different provider during the reveal window, preserving
    /// one holder per slot. Returns whether the commit happened.
    fn commit_selection(&mut self, selection: Assignment, tick: usize) -> bool {
        self.pending.remove(&(selection.provider, selection.slot));

        if let Some(holder) = self.store.holder_of(selection.slot) {
            if holder != selection.provider {
                self.event_log.log(Event::CommitSkipped {
                    tick,
                    provider: selection.provider,
                    slot: selection.slot,
                });
                return false;
            }
        }

        self.store.commit(selection.provider, selection.slot);
        self.newly_committed.insert((selection.provider, selection.slot));
        self.event_log.log(Event::Committed {
            tick,
            provider: selection.provider,
            slot: selection.slot,
        });
        true
    }

    /// Auto-stop: success termination. The store and NewlyCommitted
    /// marks survive (they are the run's result); Pending cannot.
    fn auto_stop(&mut self, tick: usize) {
        self.run_state = RunState::Idle;
        self.in_flight = None;
        self.pending.clear();
        self.event_log.log(Event::AutoStopped { tick });
    }

    /// After a store mutation while Running (not Paused): if no
    /// eligible assignment remains, transition to Idle.
    fn check_termination(&mut self) {
        if self.run_state == RunState::Running && self.resolve_all().is_empty() {
            self.auto_stop(self.clock);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
