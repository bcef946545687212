// src/engine.rs
//! The engine: render surface, texture loader, entity list and frame timing.
//!
//! Entities are visited from last-added to first-added, both by `start` and
//! by every tick. Within a tick each entity is updated and then drawn before
//! the engine moves on to the next one.

use futures::{Future, TryFutureExt};
use log::{debug, error, info, warn};

use crate::config::HookFailurePolicy;
use crate::entity::{Context, Entity};
use crate::error::{EngineError, HookError, HookFailure, HookPhase, LoadError};
use crate::loader::Loader;
use crate::surface::Surface;
use crate::time::{Clock, TimeState};

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Update hooks that ran successfully.
    pub updated: usize,
    /// Draw hooks that ran successfully.
    pub drawn: usize,
    pub failures: Vec<HookFailure>,
    /// The sweep stopped early because of [`HookFailurePolicy::Abort`].
    pub aborted: bool,
}

pub struct Engine<S: Surface> {
    surface: S,
    textures: Loader<S::Image>,
    time: TimeState,
    entities: Vec<Box<dyn Entity<S>>>,
    clock: Box<dyn Clock>,
    policy: HookFailurePolicy,
    started: bool,
    // Set once the "tick before start" warning has been logged.
    warned_unstarted: bool,
}

impl<S: Surface + 'static> Engine<S> {
    pub fn new(
        surface: S,
        textures: Loader<S::Image>,
        clock: impl Clock + 'static,
        policy: HookFailurePolicy,
    ) -> Self {
        Self {
            surface,
            textures,
            time: TimeState::default(),
            entities: Vec::new(),
            clock: Box::new(clock),
            policy,
            started: false,
            warned_unstarted: false,
        }
    }

    pub fn textures(&self) -> &Loader<S::Image> {
        &self.textures
    }

    pub fn time(&self) -> &TimeState {
        &self.time
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn policy(&self) -> HookFailurePolicy {
        self.policy
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entity at `index` in insertion order.
    pub fn entity(&self, index: usize) -> Option<&(dyn Entity<S> + 'static)> {
        self.entities.get(index).map(|entity| &**entity)
    }

    pub fn entity_mut(&mut self, index: usize) -> Option<&mut (dyn Entity<S> + 'static)> {
        self.entities.get_mut(index).map(|entity| &mut **entity)
    }

    /// Appends `entity` and hands it back for chaining, e.g. to subscribe to
    /// its events.
    pub fn add_entity<E: Entity<S> + 'static>(&mut self, entity: E) -> &mut (dyn Entity<S> + 'static) {
        let index = self.entities.len();
        debug!("Engine: adding entity #{} `{}`", index, entity.body().name);
        self.entities.push(Box::new(entity));
        &mut *self.entities[index]
    }

    /// Waits for every texture registered so far.
    pub fn load(&self) -> impl Future<Output = Result<(), LoadError>> + 'static {
        self.textures.load_all().map_ok(drop)
    }

    /// Runs the `start` hooks and resets the clock-based time state.
    ///
    /// Under [`HookFailurePolicy::Abort`] the first failing hook is returned
    /// and the remaining hooks are skipped.
    pub fn start(&mut self) -> Result<(), EngineError> {
        info!("Engine: starting with {} entities", self.entities.len());
        // Hooks see the time state of the previous run (zeroed on a fresh
        // engine); it is reset only after every hook has run.
        let ctx = Context { time: &self.time, textures: &self.textures };
        for (index, entity) in self.entities.iter_mut().enumerate().rev() {
            if !entity.capabilities().start {
                continue;
            }
            if let Err(error) = entity.start(&ctx) {
                let failure = failure(index, &**entity, HookPhase::Start, error);
                match self.policy {
                    HookFailurePolicy::Isolate => error!("Engine: {}", failure),
                    HookFailurePolicy::Abort => return Err(failure.into()),
                }
            }
        }

        self.time = TimeState::started_at(self.clock.now());
        self.started = true;
        Ok(())
    }

    /// Runs one frame at `timestamp` (seconds): advance time, clear the
    /// surface, then update and draw every entity.
    pub fn tick(&mut self, timestamp: f64) -> TickReport {
        if !self.started && !self.warned_unstarted {
            warn!("Engine: tick before start; start hooks have not run");
            self.warned_unstarted = true;
        }

        // --- 1. Advance time and wipe last frame's pixels ---
        self.time.advance(timestamp);
        self.surface.clear();

        // --- 2. Sweep entities, newest first ---
        let mut report = TickReport::default();
        let policy = self.policy;
        let ctx = Context { time: &self.time, textures: &self.textures };
        for (index, entity) in self.entities.iter_mut().enumerate().rev() {
            let capabilities = entity.capabilities();

            // Update first, so the draw below sees this frame's position.
            if capabilities.update && entity.body().awake {
                match entity.update(&ctx) {
                    Ok(()) => report.updated += 1,
                    Err(error) => {
                        let failure = failure(index, &**entity, HookPhase::Update, error);
                        if !report.record(policy, failure) {
                            break;
                        }
                    }
                }
            }

            // A sleeping entity can still be drawn, and a hidden one still
            // updates.
            if capabilities.draw && entity.body().visible {
                match entity.draw(&mut self.surface, &ctx) {
                    Ok(()) => report.drawn += 1,
                    Err(error) => {
                        let failure = failure(index, &**entity, HookPhase::Draw, error);
                        if !report.record(policy, failure) {
                            break;
                        }
                    }
                }
            }
        }
        report
    }
}

impl TickReport {
    /// Logs and stores `failure`. Returns whether the sweep should go on.
    fn record(&mut self, policy: HookFailurePolicy, failure: HookFailure) -> bool {
        error!("Engine: {}", failure);
        self.failures.push(failure);
        match policy {
            HookFailurePolicy::Isolate => true,
            HookFailurePolicy::Abort => {
                self.aborted = true;
                false
            }
        }
    }
}

fn failure<S: Surface>(
    index: usize,
    entity: &dyn Entity<S>,
    phase: HookPhase,
    error: HookError,
) -> HookFailure {
    HookFailure { index, name: entity.body().name.clone(), phase, error }
}
