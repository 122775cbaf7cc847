//! Timed interpolation primitives used by the progress controller.

mod animatable;
mod timing;
mod tween;

pub use animatable::Animatable;
pub use timing::TimingFunction;
pub use tween::{Step, Tween};

/// Shortest duration a transition is allowed to have, in milliseconds.
///
/// Zero, negative and non-finite durations are raised to this value so that a
/// transition always completes on the next tick instead of dividing by zero.
pub const MIN_DURATION_MS: f64 = 1.0;

/// Configuration for how progress animates when it changes
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of a full (un-rescaled) animation in milliseconds
    pub duration_ms: f64,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay before animation starts in milliseconds
    pub delay_ms: f64,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f64, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Duration with the [`MIN_DURATION_MS`] floor applied.
    pub fn effective_duration_ms(&self) -> f64 {
        floor_duration(self.duration_ms)
    }

    /// Delay with negative and non-finite values treated as no delay.
    pub fn effective_delay_ms(&self) -> f64 {
        if self.delay_ms.is_finite() {
            self.delay_ms.max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for Transition {
    /// 500ms linear, no delay
    fn default() -> Self {
        Self::new(500.0, TimingFunction::Linear)
    }
}

pub(crate) fn floor_duration(duration_ms: f64) -> f64 {
    if duration_ms.is_finite() && duration_ms >= MIN_DURATION_MS {
        duration_ms
    } else {
        MIN_DURATION_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_builder() {
        let t = Transition::new(300.0, TimingFunction::EaseIn)
            .delay(50.0)
            .duration(800.0);
        assert_eq!(t.duration_ms, 800.0);
        assert_eq!(t.delay_ms, 50.0);
    }

    #[test]
    fn test_malformed_durations_are_floored() {
        assert_eq!(Transition::default().duration(0.0).effective_duration_ms(), MIN_DURATION_MS);
        assert_eq!(Transition::default().duration(-40.0).effective_duration_ms(), MIN_DURATION_MS);
        assert_eq!(
            Transition::default().duration(f64::NAN).effective_duration_ms(),
            MIN_DURATION_MS
        );
        assert_eq!(Transition::default().effective_duration_ms(), 500.0);
    }

    #[test]
    fn test_negative_delay_is_ignored() {
        assert_eq!(Transition::default().delay(-10.0).effective_delay_ms(), 0.0);
        assert_eq!(Transition::default().delay(f64::INFINITY).effective_delay_ms(), 0.0);
    }
}
