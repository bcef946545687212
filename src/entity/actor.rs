// src/entity/actor.rs

use super::{Body, Capabilities, Context, Entity, FrameEvents, HookResult};
use crate::events::FRAME;
use crate::surface::Surface;
use crate::time::TimeState;

/// The base entity: a body plus its event hub.
///
/// Its update hook dispatches [`FRAME`] to its own listeners. It draws
/// nothing.
#[derive(Debug)]
pub struct Actor {
    pub body: Body,
    pub events: FrameEvents,
}

impl Actor {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self { body: Body::new(name, x, y), events: FrameEvents::new() }
    }

    pub fn on<F>(&mut self, event: impl Into<String>, callback: F) -> &mut Self
    where
        F: FnMut(&mut Body, &TimeState) + 'static,
    {
        self.events.on(event, callback);
        self
    }

    /// Builder form of [`Actor::on`].
    pub fn with_listener<F>(mut self, event: impl Into<String>, callback: F) -> Self
    where
        F: FnMut(&mut Body, &TimeState) + 'static,
    {
        self.events.on(event, callback);
        self
    }

    /// Dispatches [`FRAME`] with `time`.
    pub fn frame(&mut self, time: &TimeState) {
        self.events.dispatch(FRAME, &mut self.body, time);
    }
}

impl<S: Surface> Entity<S> for Actor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn parts_mut(&mut self) -> (&mut Body, &mut FrameEvents) {
        (&mut self.body, &mut self.events)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::UPDATE
    }

    fn update(&mut self, ctx: &Context<'_, S>) -> HookResult {
        self.frame(ctx.time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_actor_is_awake_visible_and_unrotated() {
        let actor = Actor::new("hero", 3.0, 4.0);
        assert_eq!(actor.body.name, "hero");
        assert_eq!((actor.body.x, actor.body.y), (3.0, 4.0));
        assert_eq!(actor.body.rotation, 0.0);
        assert!(actor.body.awake);
        assert!(actor.body.visible);
    }

    #[test]
    fn frame_listeners_can_move_the_body() {
        let mut actor = Actor::new("mover", 0.0, 0.0)
            .with_listener(FRAME, |body, time| body.x += 50.0 * time.delta);

        let time = TimeState { delta: 0.5, ..TimeState::default() };
        actor.frame(&time);
        assert_eq!(actor.body.x, 25.0);
    }
}
