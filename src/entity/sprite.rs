// src/entity/sprite.rs

use super::{Actor, Body, Capabilities, Context, Entity, FrameEvents, HookResult};
use crate::error::SurfaceError;
use crate::surface::Surface;
use crate::time::TimeState;

/// An [`Actor`] that draws an image at its position, rotated around the
/// image centre.
#[derive(Debug)]
pub struct Sprite<I> {
    pub actor: Actor,
    pub image: I,
}

impl<I> Sprite<I> {
    pub fn new(name: impl Into<String>, x: f64, y: f64, image: I) -> Self {
        Self { actor: Actor::new(name, x, y), image }
    }

    pub fn body(&self) -> &Body {
        &self.actor.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.actor.body
    }

    pub fn on<F>(&mut self, event: impl Into<String>, callback: F) -> &mut Self
    where
        F: FnMut(&mut Body, &TimeState) + 'static,
    {
        self.actor.on(event, callback);
        self
    }

    pub fn with_listener<F>(mut self, event: impl Into<String>, callback: F) -> Self
    where
        F: FnMut(&mut Body, &TimeState) + 'static,
    {
        self.actor.on(event, callback);
        self
    }
}

fn draw_rotated<S: Surface>(
    surface: &mut S,
    image: &S::Image,
    x: f64,
    y: f64,
    rotation: f64,
) -> Result<(), SurfaceError> {
    let (width, height) = surface.image_size(image);
    let (cx, cy) = (x + width / 2.0, y + height / 2.0);
    surface.translate(cx, cy)?;
    surface.rotate(rotation)?;
    surface.translate(-cx, -cy)?;
    surface.draw_image(image, x, y)
}

impl<S: Surface> Entity<S> for Sprite<S::Image> {
    fn body(&self) -> &Body {
        &self.actor.body
    }

    fn parts_mut(&mut self) -> (&mut Body, &mut FrameEvents) {
        (&mut self.actor.body, &mut self.actor.events)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::UPDATE_DRAW
    }

    fn update(&mut self, ctx: &Context<'_, S>) -> HookResult {
        self.actor.frame(ctx.time);
        Ok(())
    }

    fn draw(&mut self, surface: &mut S, _ctx: &Context<'_, S>) -> HookResult {
        let Body { x, y, rotation, .. } = self.actor.body;
        if rotation == 0.0 {
            surface.draw_image(&self.image, x, y)?;
            return Ok(());
        }

        surface.save();
        let drawn = draw_rotated(surface, &self.image, x, y, rotation);
        // Restore even when a transform call failed.
        surface.restore();
        Ok(drawn?)
    }
}
