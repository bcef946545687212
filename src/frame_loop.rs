// src/frame_loop.rs
//! Drives an [`Engine`] from a [`FrameScheduler`].
//!
//! The loop keeps exactly one frame request outstanding. Each callback ticks
//! the engine and requests the next frame, whatever the tick reported. It
//! only ends when [`FrameLoop::stop`] cancels the outstanding request.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use futures::Future;
use log::{error, info, warn};

use crate::engine::Engine;
use crate::error::{EngineError, LoadError};
use crate::surface::Surface;
use crate::time::{FrameRequest, FrameScheduler};

/// Shared, single-threaded handle to an engine.
pub struct EngineHandle<S: Surface>(Rc<RefCell<Engine<S>>>);

impl<S: Surface> Clone for EngineHandle<S> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<S: Surface + 'static> EngineHandle<S> {
    pub fn new(engine: Engine<S>) -> Self {
        Self(Rc::new(RefCell::new(engine)))
    }

    pub fn borrow(&self) -> Ref<'_, Engine<S>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Engine<S>> {
        self.0.borrow_mut()
    }

    /// Waits for the engine's textures and resolves to this handle.
    pub fn load(&self) -> impl Future<Output = Result<Self, LoadError>> + 'static {
        let handle = self.clone();
        let textures = self.0.borrow().load();
        async move {
            textures.await?;
            Ok(handle)
        }
    }

    /// Starts the engine and its frame loop.
    pub fn start(&self, scheduler: Rc<dyn FrameScheduler>) -> Result<FrameLoop, EngineError> {
        FrameLoop::start(self.clone(), scheduler)
    }
}

struct LoopState {
    scheduler: Rc<dyn FrameScheduler>,
    pending: Cell<Option<FrameRequest>>,
    running: Cell<bool>,
}

/// A running frame loop. Clones control the same loop.
#[derive(Clone)]
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    /// Runs the engine's `start` hooks and requests the first frame.
    pub fn start<S: Surface + 'static>(
        engine: EngineHandle<S>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Result<Self, EngineError> {
        // Start hooks run before the first frame is requested, so a failing
        // hook under the abort policy leaves nothing scheduled.
        engine.borrow_mut().start()?;
        let state = Rc::new(LoopState {
            scheduler,
            pending: Cell::new(None),
            running: Cell::new(true),
        });
        request_next(engine, Rc::clone(&state))?;
        info!("FrameLoop: running");
        Ok(Self { state })
    }

    /// Cancels the outstanding frame request. Idempotent.
    pub fn stop(&self) {
        if !self.state.running.replace(false) {
            return;
        }
        // Called from inside a frame callback there is nothing pending; the
        // callback sees `running == false` and does not reschedule.
        if let Some(request) = self.state.pending.take() {
            self.state.scheduler.cancel_frame(request);
        }
        info!("FrameLoop: stopped");
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }
}

impl fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLoop")
            .field("running", &self.state.running.get())
            .field("pending", &self.state.pending.get())
            .finish()
    }
}

fn request_next<S: Surface + 'static>(
    engine: EngineHandle<S>,
    state: Rc<LoopState>,
) -> Result<(), EngineError> {
    let next = Rc::clone(&state);
    let request = state.scheduler.request_frame(Box::new(move |timestamp| {
        // --- 1. This request has fired, so nothing is outstanding now ---
        next.pending.set(None);
        if !next.running.get() {
            return;
        }

        // --- 2. Tick the engine, unless somebody else is holding it ---
        match engine.0.try_borrow_mut() {
            Ok(mut guard) => {
                let report = guard.tick(timestamp);
                if report.aborted {
                    warn!(
                        "FrameLoop: frame {} aborted after {} failure(s)",
                        guard.time().frame,
                        report.failures.len()
                    );
                }
            }
            // Somebody holds the engine across a frame boundary; skip this one.
            Err(_) => warn!("FrameLoop: engine busy, skipping frame at {:.3}s", timestamp),
        }

        // --- 3. Ask for the next frame ---
        // A listener may have called `stop` during the tick. Its cancel found
        // no pending request, so the loop has to end here instead.
        if !next.running.get() {
            return;
        }
        if let Err(err) = request_next(engine, next) {
            error!("FrameLoop: could not request the next frame: {}", err);
        }
    }))?;
    state.pending.set(Some(request));
    Ok(())
}
