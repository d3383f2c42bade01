//! Frame-driven animation clock with reversible runs.
//!
//! An [`AnimationClock`] holds a raw progress value in `[0, 1]` and advances it
//! linearly by frame deltas. The value handed to consumers is the progress
//! passed through an [`EaseFunction`], which may overshoot `[0, 1]`.
use std::{fmt, time::Duration};

/// Easing function applied to raw animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EaseFunction {
    #[default]
    Linear,
    QuadraticInOut,
    /// Cubic back-out curve. Overshoots past `1.0` near the end of the run.
    BackOut,
}

const BACK_OVERSHOOT: f32 = 1.701_58;

impl EaseFunction {
    /// Sample the curve at `x`. Input is clamped to `[0, 1]`, output is not.
    #[must_use]
    pub fn sample(self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        match self {
            Self::Linear => x,
            Self::QuadraticInOut => {
                if x < 0.5 {
                    2.0 * x * x
                } else {
                    1.0 - ((-2.0 * x + 2.0).powi(2) / 2.0)
                }
            }
            Self::BackOut => {
                let c3 = BACK_OVERSHOOT + 1.0;
                let t = x - 1.0;
                1.0 + c3 * t.powi(3) + BACK_OVERSHOOT * t.powi(2)
            }
        }
    }
}

/// Direction a run is driving the progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationDirection {
    /// Towards `1.0`.
    Forward,
    /// Towards `0.0`.
    Reverse,
}

/// Lifecycle status reported by an [`AnimationClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Stopped at `0.0`.
    Dismissed,
    /// Running towards `1.0`.
    Forward,
    /// Running towards `0.0`.
    Reverse,
    /// Stopped at `1.0`.
    Completed,
}

/// Owned animation resource driven by explicit frame ticks.
#[derive(Clone)]
pub struct AnimationClock {
    value: f32,
    duration: Duration,
    ease: EaseFunction,
    direction: AnimationDirection,
    running: bool,
}

impl AnimationClock {
    #[must_use]
    pub fn new(duration: Duration, ease: EaseFunction) -> Self {
        Self {
            value: 0.0,
            duration,
            ease,
            direction: AnimationDirection::Forward,
            running: false,
        }
    }

    /// Raw linear progress in `[0, 1]`.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Eased progress. May leave `[0, 1]` for overshooting curves.
    #[must_use]
    pub fn eased(&self) -> f32 {
        self.ease.sample(self.value)
    }

    #[must_use]
    pub fn direction(&self) -> AnimationDirection {
        self.direction
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn status(&self) -> AnimationStatus {
        match (self.running, self.direction) {
            (true, AnimationDirection::Forward) => AnimationStatus::Forward,
            (true, AnimationDirection::Reverse) => AnimationStatus::Reverse,
            (false, _) if self.value >= 1.0 => AnimationStatus::Completed,
            (false, _) => AnimationStatus::Dismissed,
        }
    }

    /// Start driving towards `1.0` from the current value.
    ///
    /// Any run in progress is replaced; the value is left untouched.
    pub fn forward(&mut self) {
        self.drive(AnimationDirection::Forward);
    }

    /// Start driving towards `0.0` from the current value.
    pub fn reverse(&mut self) {
        self.drive(AnimationDirection::Reverse);
    }

    /// Halt the current run without a completion notification.
    pub fn stop(&mut self) {
        self.running = false;
    }

    fn drive(&mut self, direction: AnimationDirection) {
        self.direction = direction;
        self.running = true;
        tracing::trace!(?direction, value = self.value, "animation run started");
    }

    /// Advance the running animation by one frame.
    ///
    /// Returns the terminal status exactly once per run, on the tick that
    /// reaches the bound. A run started at its bound completes on the next tick.
    pub fn tick(&mut self, delta: Duration) -> Option<AnimationStatus> {
        if !self.running {
            return None;
        }

        let step = if self.duration.is_zero() {
            1.0
        } else {
            delta.as_secs_f32() / self.duration.as_secs_f32()
        };

        let (next, bound, status) = match self.direction {
            AnimationDirection::Forward => (self.value + step, 1.0, AnimationStatus::Completed),
            AnimationDirection::Reverse => (self.value - step, 0.0, AnimationStatus::Dismissed),
        };
        self.value = next.clamp(0.0, 1.0);

        if self.value == bound {
            self.running = false;
            return Some(status);
        }

        None
    }
}

impl fmt::Debug for AnimationClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationClock")
            .field("value", &self.value)
            .field("duration", &self.duration)
            .field("ease", &self.ease)
            .field("status", &self.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(50);

    #[test]
    fn back_out_overshoots_then_settles() {
        let peak = (0..=100)
            .map(|i| EaseFunction::BackOut.sample(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);

        assert!(peak > 1.0);
        assert!((EaseFunction::BackOut.sample(0.0)).abs() < 1e-6);
        assert!((EaseFunction::BackOut.sample(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn forward_run_reports_completion_once() {
        let mut clock = AnimationClock::new(Duration::from_millis(200), EaseFunction::Linear);
        clock.forward();

        let statuses = (0..10).filter_map(|_| clock.tick(FRAME)).collect::<Vec<_>>();

        assert_eq!(statuses, vec![AnimationStatus::Completed]);
        assert_eq!(clock.status(), AnimationStatus::Completed);
        assert_eq!(clock.value(), 1.0);
    }

    #[test]
    fn reversing_mid_run_keeps_current_value() {
        let mut clock = AnimationClock::new(Duration::from_millis(200), EaseFunction::BackOut);
        clock.forward();
        clock.tick(FRAME);
        clock.tick(FRAME);
        let before = clock.value();

        clock.reverse();

        assert_eq!(clock.value(), before);
        assert_eq!(clock.direction(), AnimationDirection::Reverse);
        assert_eq!(clock.status(), AnimationStatus::Reverse);
        clock.tick(FRAME);
        assert!(clock.value() < before);
    }

    #[test]
    fn zero_duration_jumps_to_bound() {
        let mut clock = AnimationClock::new(Duration::ZERO, EaseFunction::Linear);
        clock.forward();

        assert_eq!(clock.tick(Duration::ZERO), Some(AnimationStatus::Completed));
    }

    #[test]
    fn stopped_clock_ignores_ticks() {
        let mut clock = AnimationClock::new(Duration::from_millis(200), EaseFunction::Linear);
        clock.forward();
        clock.tick(FRAME);
        assert!(clock.is_running());
        clock.stop();
        let halted = clock.value();

        assert!(!clock.is_running());
        assert_eq!(clock.tick(FRAME), None);
        assert_eq!(clock.value(), halted);
    }
}
