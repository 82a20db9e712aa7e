//! Per-frame driver: one clock update and one ephemeris evaluation per frame.
//!
//! This is the role a display refresh callback plays in an interactive front
//! end. Frame times are supplied explicitly so headless runs are
//! deterministic.

use orrery_orbit::{BodyCatalog, Ephemeris, SimulationClock, evaluate_all};
use tracing::warn;

/// Maximum frame time clamp. A stalled frame is accepted as slowdown rather
/// than letting simulated time lurch forward.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Clock plus frame bookkeeping.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    clock: SimulationClock,
    frame_count: u64,
}

impl FrameLoop {
    /// Loop whose clock converts one real second at speed 1 into
    /// `days_per_second` simulated days.
    pub fn new(days_per_second: f64) -> Self {
        Self {
            clock: SimulationClock::with_days_per_second(days_per_second),
            frame_count: 0,
        }
    }

    /// Runs one frame of `frame_time` real seconds with the given controls and
    /// returns the ephemeris at the new simulated time.
    pub fn tick(
        &mut self,
        mut frame_time: f64,
        speed: f64,
        paused: bool,
        catalog: &BodyCatalog,
    ) -> Ephemeris {
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        let days = self.clock.advance(frame_time, speed, paused);
        self.frame_count += 1;
        evaluate_all(catalog, days)
    }

    /// Returns the total number of frames run.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the accumulated simulated days.
    pub fn elapsed_days(&self) -> f64 {
        self.clock.elapsed_days()
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(orrery_orbit::DEFAULT_DAYS_PER_SECOND)
    }
}
