// src/entity/mod.rs
//! Entities: positioned, nameable objects the engine updates and draws.
//!
//! An entity declares which hooks it has through [`Capabilities`]; the engine
//! only calls a hook the entity claims. Shared state lives in [`Body`], and
//! every entity owns an [`EventHub`] keyed by event name.

pub mod actor;
pub mod sprite;

pub use actor::Actor;
pub use sprite::Sprite;

use crate::error::HookError;
use crate::events::EventHub;
use crate::loader::Loader;
use crate::surface::Surface;
use crate::time::TimeState;

/// Position and lifecycle flags common to every entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Advisory label; not unique.
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Radians.
    pub rotation: f64,
    /// Gates the update hook.
    pub awake: bool,
    /// Gates the draw hook.
    pub visible: bool,
}

impl Body {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            rotation: 0.0,
            awake: true,
            visible: true,
        }
    }
}

/// Event hub every entity owns. Listeners get the entity's body and the
/// engine's time state.
pub type FrameEvents = EventHub<Body, TimeState>;

pub type HookResult = Result<(), HookError>;

/// Which optional hooks an entity implements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub start: bool,
    pub update: bool,
    pub draw: bool,
}

impl Capabilities {
    pub const NONE: Self = Self { start: false, update: false, draw: false };
    pub const UPDATE: Self = Self { start: false, update: true, draw: false };
    pub const UPDATE_DRAW: Self = Self { start: false, update: true, draw: true };

    pub const fn with_start(self) -> Self {
        Self { start: true, ..self }
    }

    pub const fn with_update(self) -> Self {
        Self { update: true, ..self }
    }

    pub const fn with_draw(self) -> Self {
        Self { draw: true, ..self }
    }
}

/// Read-only view of the engine handed to hooks.
pub struct Context<'a, S: Surface> {
    pub time: &'a TimeState,
    pub textures: &'a Loader<S::Image>,
}

/// Something the engine can schedule.
///
/// Hooks default to doing nothing; [`Entity::capabilities`] decides which of
/// them the engine actually calls.
pub trait Entity<S: Surface> {
    fn body(&self) -> &Body;

    /// The body and the event hub, borrowed together so a dispatch can hand
    /// the body to the hub's listeners.
    fn parts_mut(&mut self) -> (&mut Body, &mut FrameEvents);

    fn body_mut(&mut self) -> &mut Body {
        self.parts_mut().0
    }

    fn events_mut(&mut self) -> &mut FrameEvents {
        self.parts_mut().1
    }

    fn capabilities(&self) -> Capabilities;

    /// Called once by `Engine::start`.
    fn start(&mut self, _ctx: &Context<'_, S>) -> HookResult {
        Ok(())
    }

    /// Called every frame while `awake`.
    fn update(&mut self, _ctx: &Context<'_, S>) -> HookResult {
        Ok(())
    }

    /// Called every frame while `visible`, right after `update`.
    fn draw(&mut self, _surface: &mut S, _ctx: &Context<'_, S>) -> HookResult {
        Ok(())
    }
}

impl<S: Surface> dyn Entity<S> {
    /// Subscribes to one of this entity's events. Returns the entity for
    /// chaining after `Engine::add_entity`.
    pub fn on<F>(&mut self, event: impl Into<String>, callback: F) -> &mut Self
    where
        F: FnMut(&mut Body, &TimeState) + 'static,
    {
        self.events_mut().on(event, callback);
        self
    }

    /// Fires `event` on this entity's hub, last-registered listener first.
    /// Listeners get the entity's body and `time`.
    pub fn dispatch(&mut self, event: &str, time: &TimeState) {
        let (body, events) = self.parts_mut();
        events.dispatch(event, body, time);
    }

    pub fn name(&self) -> &str {
        &self.body().name
    }
}
