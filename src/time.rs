// src/time.rs
//! Frame timing state and the platform seams that drive it.

use crate::error::EngineError;

/// Timing of the running frame loop, in seconds since an arbitrary epoch.
///
/// Only the engine writes it; hooks and listeners read it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeState {
    /// Clock reading taken by `start`.
    pub start: f64,
    /// Timestamp of the current frame.
    pub now: f64,
    /// Timestamp of the previous frame.
    pub last_frame: f64,
    /// `now - last_frame`, never negative.
    pub delta: f64,
    /// Ticks run since `start`.
    pub frame: u64,
}

impl TimeState {
    /// State right after `start`: every stamp at `now`, no elapsed time.
    pub fn started_at(now: f64) -> Self {
        Self { start: now, now, last_frame: now, delta: 0.0, frame: 0 }
    }

    /// Advances to a new frame timestamp.
    ///
    /// The first frame after `start` rebases on its own timestamp so its
    /// delta is exactly 0. A timestamp older than `now` is clamped, which
    /// keeps `now` monotonic and `delta` non-negative.
    pub fn advance(&mut self, timestamp: f64) {
        if self.frame == 0 {
            self.last_frame = timestamp;
            self.now = timestamp;
        } else {
            self.last_frame = self.now;
            self.now = timestamp.max(self.now);
        }
        self.delta = self.now - self.last_frame;
        self.frame += 1;
    }

    /// Seconds since `start`.
    pub fn elapsed(&self) -> f64 {
        self.now - self.start
    }
}

/// Monotonic clock returning seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Called with the frame timestamp in seconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Ticket for a requested frame, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub i32);

/// Once-per-refresh callback primitive (`requestAnimationFrame` in a browser).
///
/// Implementations must not call `callback` from inside `request_frame`.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameRequest, EngineError>;
    fn cancel_frame(&self, request: FrameRequest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut time = TimeState::started_at(10.0);
        time.advance(10.25);
        assert_eq!(time.delta, 0.0);
        assert_eq!(time.now, 10.25);
        assert_eq!(time.frame, 1);
        assert_eq!(time.start, 10.0);
    }

    #[test]
    fn later_frames_measure_distance_to_previous_frame() {
        let mut time = TimeState::started_at(0.0);
        time.advance(1.0);
        time.advance(1.5);
        assert_eq!(time.last_frame, 1.0);
        assert_eq!(time.delta, 0.5);
        time.advance(1.75);
        assert_eq!(time.delta, 0.25);
        assert_eq!(time.elapsed(), 1.75);
    }

    #[test]
    fn timestamps_going_backwards_are_clamped() {
        let mut time = TimeState::started_at(0.0);
        time.advance(2.0);
        time.advance(3.0);
        time.advance(2.5);
        assert_eq!(time.now, 3.0);
        assert_eq!(time.delta, 0.0);
    }
}
