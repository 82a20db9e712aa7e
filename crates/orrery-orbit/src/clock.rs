//! Simulation clock: accumulates simulated days from real-time frame deltas.
//!
//! The clock is driven once per rendered frame with the latest control values
//! (speed multiplier, paused flag). Whenever those controls change between two
//! calls, the delta that arrives with the change is discarded and the baseline
//! restarts, so adjusting controls mid-flight never makes simulated time jump.

/// Simulated days per real second at speed 1.
pub const DEFAULT_DAYS_PER_SECOND: f64 = 1.0;

/// Playback controls supplied with every clock update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockControls {
    /// Speed multiplier, never negative.
    pub speed: f64,
    pub paused: bool,
}

impl ClockControls {
    /// Negative and non-finite speeds are treated as zero.
    pub fn new(speed: f64, paused: bool) -> Self {
        Self {
            speed: sanitize(speed),
            paused,
        }
    }
}

/// Accumulated simulated time plus the baseline needed to turn samples into
/// deltas.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    elapsed_days: f64,
    last_sample: Option<f64>,
    controls: Option<ClockControls>,
    days_per_second: f64,
}

impl SimulationClock {
    /// Clock using [`DEFAULT_DAYS_PER_SECOND`].
    pub fn new() -> Self {
        Self::with_days_per_second(DEFAULT_DAYS_PER_SECOND)
    }

    /// Clock converting one real second at speed 1 into `days_per_second`
    /// simulated days.
    pub fn with_days_per_second(days_per_second: f64) -> Self {
        let days_per_second = if days_per_second.is_finite() && days_per_second >= 0.0 {
            days_per_second
        } else {
            log::warn!(
                "Invalid clock unit {days_per_second} days/s, using {DEFAULT_DAYS_PER_SECOND}"
            );
            DEFAULT_DAYS_PER_SECOND
        };

        Self {
            elapsed_days: 0.0,
            last_sample: None,
            controls: None,
            days_per_second,
        }
    }

    /// Advance by a real-time delta and return the accumulated simulated days.
    ///
    /// A delta delivered together with changed controls contributes nothing.
    /// Negative deltas count as zero.
    pub fn advance(&mut self, real_delta_seconds: f64, speed: f64, paused: bool) -> f64 {
        let controls = ClockControls::new(speed, paused);
        if !self.adopt(controls) {
            self.accumulate(sanitize(real_delta_seconds), controls);
        }
        self.elapsed_days
    }

    /// Advance from an absolute real-time timestamp in seconds, such as the
    /// one handed to a display refresh callback.
    ///
    /// The first sample, and the first one after a control change, only
    /// establish the baseline.
    pub fn sample(&mut self, now_seconds: f64, speed: f64, paused: bool) -> f64 {
        let controls = ClockControls::new(speed, paused);
        self.adopt(controls);

        let delta = self
            .last_sample
            .map_or(0.0, |previous| sanitize(now_seconds - previous));
        if now_seconds.is_finite() {
            self.last_sample = Some(now_seconds);
        }

        self.accumulate(delta, controls);
        self.elapsed_days
    }

    /// Accumulated simulated days.
    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }

    /// Controls seen on the most recent update, if any.
    pub fn controls(&self) -> Option<ClockControls> {
        self.controls
    }

    pub fn days_per_second(&self) -> f64 {
        self.days_per_second
    }

    /// Return to the epoch and forget the real-time baseline.
    pub fn reset(&mut self) {
        self.elapsed_days = 0.0;
        self.last_sample = None;
        self.controls = None;
    }

    /// Record `controls`; returns true (and drops the baseline) when they
    /// differ from the previous update.
    fn adopt(&mut self, controls: ClockControls) -> bool {
        let changed = self
            .controls
            .is_some_and(|previous| previous != controls);
        if changed {
            log::debug!(
                "Clock controls changed to speed={} paused={}, restarting baseline",
                controls.speed,
                controls.paused
            );
            self.last_sample = None;
        }
        self.controls = Some(controls);
        changed
    }

    fn accumulate(&mut self, real_delta_seconds: f64, controls: ClockControls) {
        if !controls.paused {
            self.elapsed_days += real_delta_seconds * controls.speed * self.days_per_second;
        }
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
