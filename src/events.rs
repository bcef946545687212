// src/events.rs
//! Per-entity named-event registry.
//!
//! Listeners receive the entity state the hub is attached to (`target`) and
//! the event arguments. The hub lives next to its target instead of inside
//! it, so `dispatch` can hand out `&mut T` while iterating its own listeners.

use std::collections::HashMap;
use std::fmt;

/// Name of the event an [`crate::entity::Actor`] dispatches on every update.
pub const FRAME: &str = "frame";

type Listener<T, A> = Box<dyn FnMut(&mut T, &A)>;

/// Named publish/subscribe registry.
pub struct EventHub<T, A> {
    listeners: HashMap<String, Vec<Listener<T, A>>>,
}

impl<T, A> EventHub<T, A> {
    pub fn new() -> Self {
        Self { listeners: HashMap::new() }
    }

    /// Registers `callback` for `event`. The same closure may be registered
    /// more than once and then fires once per registration.
    pub fn on<F>(&mut self, event: impl Into<String>, callback: F) -> &mut Self
    where
        F: FnMut(&mut T, &A) + 'static,
    {
        self.listeners
            .entry(event.into())
            .or_default()
            .push(Box::new(callback));
        self
    }

    /// Calls every listener of `event`, last-registered first.
    /// Does nothing when the event has no listeners.
    pub fn dispatch(&mut self, event: &str, target: &mut T, args: &A) {
        let Some(callbacks) = self.listeners.get_mut(event) else {
            return;
        };
        for callback in callbacks.iter_mut().rev() {
            callback(target, args);
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }
}

impl<T, A> Default for EventHub<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A> fmt::Debug for EventHub<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (event, callbacks) in &self.listeners {
            map.entry(event, &callbacks.len());
        }
        map.finish()
    }
}
