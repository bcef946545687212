// src/testing.rs
//! Fakes for the platform seams, used by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{EngineError, SurfaceError};
use crate::surface::Surface;
use crate::time::{Clock, FrameCallback, FrameRequest, FrameScheduler};

/// Image stand-in: a label and a size.
#[derive(Debug, Clone, PartialEq)]
pub struct TestImage {
    pub label: &'static str,
    pub width: f64,
    pub height: f64,
}

impl TestImage {
    pub fn new(label: &'static str, width: f64, height: f64) -> Self {
        Self { label, width, height }
    }
}

/// Surface that records every call as text. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Rc<RefCell<Vec<String>>>,
    /// Makes `draw_image` fail for the image with this label.
    pub reject: Option<&'static str>,
}

impl RecordingSurface {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl Surface for RecordingSurface {
    type Image = TestImage;

    fn size(&self) -> (f64, f64) {
        (320.0, 240.0)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(format!("clear {x} {y} {width} {height}"));
    }

    fn draw_image(&mut self, image: &TestImage, x: f64, y: f64) -> Result<(), SurfaceError> {
        if self.reject == Some(image.label) {
            return Err(SurfaceError::new("drawImage", "rejected"));
        }
        self.record(format!("draw {} {x} {y}", image.label));
        Ok(())
    }

    fn image_size(&self, image: &TestImage) -> (f64, f64) {
        (image.width, image.height)
    }

    fn save(&mut self) {
        self.record("save".into());
    }

    fn restore(&mut self) {
        self.record("restore".into());
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.record(format!("translate {x} {y}"));
        Ok(())
    }

    fn rotate(&mut self, angle: f64) -> Result<(), SurfaceError> {
        self.record(format!("rotate {angle}"));
        Ok(())
    }
}

/// Clock whose reading the test sets by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(pub Rc<Cell<f64>>);

impl ManualClock {
    pub fn set(&self, seconds: f64) {
        self.0.set(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.0.get()
    }
}

/// Frame scheduler that queues callbacks until the test fires them.
#[derive(Default)]
pub struct ManualFrames {
    queued: RefCell<Vec<(FrameRequest, FrameCallback)>>,
    next_id: Cell<i32>,
    pub cancelled: RefCell<Vec<FrameRequest>>,
}

impl ManualFrames {
    pub fn pending(&self) -> usize {
        self.queued.borrow().len()
    }

    /// Runs every queued callback with `timestamp` (seconds). Returns how
    /// many ran.
    pub fn fire(&self, timestamp: f64) -> usize {
        let due: Vec<_> = self.queued.borrow_mut().drain(..).collect();
        let count = due.len();
        for (_, callback) in due {
            callback(timestamp);
        }
        count
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameRequest, EngineError> {
        let request = FrameRequest(self.next_id.get());
        self.next_id.set(request.0 + 1);
        self.queued.borrow_mut().push((request, callback));
        Ok(request)
    }

    fn cancel_frame(&self, request: FrameRequest) {
        self.queued.borrow_mut().retain(|(queued, _)| *queued != request);
        self.cancelled.borrow_mut().push(request);
    }
}
