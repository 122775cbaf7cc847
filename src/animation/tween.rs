use std::time::{Duration, Instant};

use super::{Animatable, Transition};

/// Result of advancing a tween to a point in time
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    /// Still inside the delay window; the value has not started moving
    Delayed(T),
    /// Interpolating; carries the eased value at the sampled instant
    Running(T),
    /// Reached the end; carries the exact target value
    Finished(T),
}

impl<T> Step<T> {
    /// The value carried by this step, whatever the phase
    pub fn value(&self) -> &T {
        match self {
            Step::Delayed(v) | Step::Running(v) | Step::Finished(v) => v,
        }
    }

    /// Returns true once the tween has reached its target
    pub fn is_finished(&self) -> bool {
        matches!(self, Step::Finished(_))
    }
}

/// A single timed interpolation from `start` to `target`.
///
/// Time is supplied by the caller, so sampling is a pure function of the
/// instant passed in: sampling the same tween twice at the same instant yields
/// the same value, and a host can drive it from a real clock or a simulated one.
#[derive(Debug, Clone)]
pub struct Tween<T: Animatable> {
    /// Value when the tween started
    start: T,
    /// Value the tween ends on
    target: T,
    /// Time the tween was started (the delay counts from here)
    start_time: Instant,
    /// Duration after the delay, already floored
    duration_ms: f64,
    /// Delay before interpolation begins
    delay_ms: f64,
    /// Transition providing the timing curve
    transition: Transition,
}

impl<T: Animatable> Tween<T> {
    /// Start a tween at `now`. `duration_ms` overrides the transition's own
    /// duration so callers can rescale it; the delay and timing curve are
    /// taken from `transition`.
    pub fn new(start: T, target: T, transition: &Transition, duration_ms: f64, now: Instant) -> Self {
        Self {
            start,
            target,
            start_time: now,
            duration_ms: super::floor_duration(duration_ms),
            delay_ms: transition.effective_delay_ms(),
            transition: transition.clone(),
        }
    }

    /// Sample the tween at `now`.
    pub fn sample(&self, now: Instant) -> Step<T> {
        let elapsed = millis(now.saturating_duration_since(self.start_time));
        let adjusted_elapsed = elapsed - self.delay_ms;

        if adjusted_elapsed <= 0.0 {
            return Step::Delayed(self.start.clone());
        }

        let t = adjusted_elapsed / self.duration_ms;
        if t >= 1.0 {
            return Step::Finished(self.target.clone());
        }

        let eased_t = self.transition.timing.evaluate(t);
        Step::Running(T::lerp(&self.start, &self.target, eased_t))
    }

    /// Get the start value
    pub fn start(&self) -> &T {
        &self.start
    }

    /// Get the target value
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Duration of the interpolation itself, excluding the delay
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Instant at which the tween reaches its target
    pub fn end_time(&self) -> Instant {
        let total_ns = ((self.delay_ms + self.duration_ms) * 1_000_000.0).round();
        self.start_time + Duration::from_nanos(total_ns as u64)
    }
}

/// Whole-nanosecond conversion keeps integral millisecond spans exact.
pub(crate) fn millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TimingFunction;

    fn linear(duration_ms: f64) -> Transition {
        Transition::new(duration_ms, TimingFunction::Linear)
    }

    #[test]
    fn test_tween_starts_at_start_value() {
        let now = Instant::now();
        let tween = Tween::new(0.0f64, 1.0, &linear(500.0), 500.0, now);
        assert_eq!(tween.sample(now), Step::Delayed(0.0));
    }

    #[test]
    fn test_tween_midpoint_linear() {
        let now = Instant::now();
        let tween = Tween::new(0.0f64, 1.0, &linear(1000.0), 1000.0, now);
        assert_eq!(
            tween.sample(now + Duration::from_millis(250)),
            Step::Running(0.25)
        );
    }

    #[test]
    fn test_tween_finishes_on_exact_target() {
        let now = Instant::now();
        let tween = Tween::new(0.1f64, 0.7, &linear(300.0), 300.0, now);
        let step = tween.sample(now + Duration::from_millis(300));
        assert!(step.is_finished());
        assert_eq!(*step.value(), 0.7);
        // Sampling long after the end keeps reporting the target
        assert_eq!(tween.sample(now + Duration::from_secs(10)), Step::Finished(0.7));
    }

    #[test]
    fn test_tween_respects_delay() {
        let now = Instant::now();
        let transition = linear(100.0).delay(200.0);
        let tween = Tween::new(0.0f64, 1.0, &transition, 100.0, now);

        assert_eq!(tween.sample(now + Duration::from_millis(150)), Step::Delayed(0.0));
        assert_eq!(
            tween.sample(now + Duration::from_millis(250)),
            Step::Running(0.5)
        );
        assert!(tween.sample(now + Duration::from_millis(300)).is_finished());
        assert_eq!(tween.end_time(), now + Duration::from_millis(300));
    }

    #[test]
    fn test_duration_override_is_floored() {
        let now = Instant::now();
        let tween = Tween::new(0.0f64, 1.0, &linear(500.0), 0.0, now);
        assert_eq!(tween.duration_ms(), crate::animation::MIN_DURATION_MS);
        assert!(tween.sample(now + Duration::from_millis(1)).is_finished());
    }

    #[test]
    fn test_sampling_before_start_is_delayed() {
        let now = Instant::now();
        let later = now + Duration::from_millis(50);
        let tween = Tween::new(0.2f64, 0.4, &linear(100.0), 100.0, later);
        assert_eq!(tween.sample(now), Step::Delayed(0.2));
    }
}
