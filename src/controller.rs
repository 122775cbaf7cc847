//! Progress animation state machine.
//!
//! [`AnimationController`] owns the only mutable copy of the ring's
//! [`ProgressState`]. Commands (`set_target`, `play`, `pause`, `reset`) and
//! frame ticks all go through `&mut self`, so there is exactly one writer.
//! Every entry point takes the instant it happens at, which keeps the
//! controller deterministic under test and lets hosts drive it from any clock.
//!
//! ```text
//!            set_target                 natural end
//!   Idle ─────────────────▶ Animating ───────────────▶ Idle
//!    ▲ │                     │     ▲
//!    │ │ pause         pause │     │ play / set_target
//!    │ ▼                     ▼     │
//!    └─────────────────── Paused ──┘
//!      play (already at target)
//! ```

use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Instant;

use crate::animation::{floor_duration, TimingFunction, Transition, Tween, MIN_DURATION_MS};

/// Sweep angle of an empty ring: the top of the circle.
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// Convert a host percentage into a progress fraction in `[0, 1]`.
///
/// `NaN` is treated as 0.
pub fn normalize(percent: f64) -> f64 {
    clamp_fraction(percent / 100.0)
}

/// Sweep angle (radians) of the end tip for a progress fraction.
///
/// `0.0` maps to the top of the circle (`-π/2`), `1.0` to one full turn later.
pub fn angle_for(progress: f64) -> f64 {
    START_ANGLE + TAU * progress
}

/// Duration for animating from `current` to `target` when the transition
/// originally started at `anchor`, so that resuming keeps the original speed.
pub fn rescaled_duration(base_ms: f64, anchor: f64, current: f64, target: f64) -> f64 {
    if target != anchor {
        base_ms * ((target - current).abs() / (target - anchor).abs())
    } else {
        base_ms
    }
}

fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Lifecycle phase of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resting at the last target (or the initial value)
    Idle,
    /// Interpolating toward the last requested target
    Animating,
    /// Frozen by `pause` or a paused reset
    Paused,
}

/// The animated values of one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressState {
    /// Animated progress fraction in `[0, 1]`
    pub current: f64,
    /// Progress the current transition was started from
    pub anchor: f64,
    /// End tip angle in radians, in `[-π/2, 3π/2]`
    pub angle: f64,
    /// True while a transition is in flight
    pub running: bool,
    /// Value captured by the last pause, cleared when animation resumes
    pub paused_value: Option<f64>,
}

/// Parameters of one started transition.
#[derive(Debug, Clone)]
pub struct AnimationRequest {
    pub target: f64,
    /// Duration after rescaling and flooring
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: TimingFunction,
}

/// What a frame needs to know about progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub progress: f64,
    pub angle: f64,
    pub phase: Phase,
}

impl ProgressSnapshot {
    /// A resting snapshot at `progress` with the angle that matches it.
    pub fn at(progress: f64) -> Self {
        let progress = clamp_fraction(progress);
        Self {
            progress,
            angle: angle_for(progress),
            phase: Phase::Idle,
        }
    }

    /// Progress as a percentage, the unit gradient stops are expressed in.
    pub fn percent(&self) -> f64 {
        self.progress * 100.0
    }
}

/// Options for [`AnimationController::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetOptions {
    /// Stay paused after resetting. `None` uses the configured default.
    pub start_in_paused_state: Option<bool>,
}

impl ResetOptions {
    pub fn paused() -> Self {
        Self {
            start_in_paused_state: Some(true),
        }
    }

    pub fn running() -> Self {
        Self {
            start_in_paused_state: Some(false),
        }
    }
}

/// Timing configuration of the progress animation.
#[derive(Clone, Debug)]
pub struct AnimationConfig {
    /// Starting progress in percent (0-100); also the value `reset` returns to
    pub initial_value: f64,
    pub transition: Transition,
    /// Start (and, by default, reset) without animating toward the target
    pub start_in_paused_state: bool,
}

impl AnimationConfig {
    /// Defaults of the pausable ring: 500ms, linear.
    pub fn ring() -> Self {
        Self {
            initial_value: 0.0,
            transition: Transition::new(500.0, TimingFunction::Linear),
            start_in_paused_state: false,
        }
    }

    /// Defaults of the circular variant: 500ms, quadratic ease-in-out.
    pub fn circular() -> Self {
        Self {
            transition: Transition::new(500.0, TimingFunction::EaseInOut),
            ..Self::ring()
        }
    }

    pub fn initial_value(mut self, percent: f64) -> Self {
        self.initial_value = percent;
        self
    }

    pub fn duration(mut self, duration_ms: f64) -> Self {
        self.transition.duration_ms = duration_ms;
        self
    }

    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.transition.delay_ms = delay_ms;
        self
    }

    pub fn easing(mut self, timing: TimingFunction) -> Self {
        self.transition.timing = timing;
        self
    }

    pub fn start_in_paused_state(mut self, paused: bool) -> Self {
        self.start_in_paused_state = paused;
        self
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::ring()
    }
}

/// Called once each time a transition runs to its end.
pub type CompletionCallback = Box<dyn FnMut() + Send>;

struct ActiveTransition {
    progress: Tween<f64>,
    angle: Tween<f64>,
    request: AnimationRequest,
}

pub struct AnimationController {
    state: ProgressState,
    phase: Phase,
    transition: Transition,
    initial_value: f64,
    start_in_paused_state: bool,
    /// Most recently requested target, resumed by `play` and `reset`
    last_target: f64,
    active: Option<ActiveTransition>,
    last_request: Option<AnimationRequest>,
    on_complete: Option<CompletionCallback>,
}

impl AnimationController {
    /// Create a controller resting at the configured initial value.
    ///
    /// With `start_in_paused_state` the controller starts in [`Phase::Paused`];
    /// otherwise it is idle until the first `set_target`.
    pub fn new(config: AnimationConfig) -> Self {
        if !(0.0..=100.0).contains(&config.initial_value) {
            log::warn!(
                "initial value {} is outside 0..=100, clamping",
                config.initial_value
            );
        }
        let initial = normalize(config.initial_value);
        let phase = if config.start_in_paused_state {
            Phase::Paused
        } else {
            Phase::Idle
        };
        Self {
            state: ProgressState {
                current: initial,
                anchor: initial,
                angle: START_ANGLE,
                running: false,
                paused_value: config.start_in_paused_state.then_some(initial),
            },
            phase,
            transition: config.transition,
            initial_value: initial,
            start_in_paused_state: config.start_in_paused_state,
            last_target: initial,
            active: None,
            last_request: None,
            on_complete: None,
        }
    }

    /// Register the callback invoked on natural completion. Cancelled,
    /// paused or reset transitions never invoke it.
    pub fn set_on_complete<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    /// Replace the timing configuration. A running transition keeps the
    /// parameters it was started with.
    pub fn set_config(&mut self, config: AnimationConfig) {
        self.transition = config.transition;
        self.initial_value = normalize(config.initial_value);
        self.start_in_paused_state = config.start_in_paused_state;
    }

    /// Animate toward `target` (a fraction, clamped to `[0, 1]`).
    pub fn set_target(&mut self, target: f64, now: Instant) {
        let target = clamp_fraction(target);
        let retarget = target != self.last_target;
        self.last_target = target;

        if self.phase == Phase::Animating {
            self.advance(now);
        }
        match self.phase {
            Phase::Animating => {
                if !retarget {
                    return;
                }
                // The interrupted transition's start no longer applies.
                self.state.anchor = self.state.current;
            }
            Phase::Paused if retarget => self.state.anchor = self.state.current,
            _ => {}
        }

        if self.state.current == target {
            self.active = None;
            self.state.running = false;
            self.state.paused_value = None;
            self.phase = Phase::Idle;
            return;
        }

        let base = self.transition.effective_duration_ms();
        let duration_ms = floor_duration(rescaled_duration(
            base,
            self.state.anchor,
            self.state.current,
            target,
        ));
        if base != self.transition.duration_ms {
            log::warn!(
                "duration {}ms is below the {}ms minimum, animating in {}ms",
                self.transition.duration_ms,
                MIN_DURATION_MS,
                duration_ms
            );
        } else if duration_ms != base {
            log::debug!(
                "rescaled duration {:.1}ms -> {:.1}ms (anchor {:.3}, current {:.3})",
                base,
                duration_ms,
                self.state.anchor,
                self.state.current
            );
        }

        let request = AnimationRequest {
            target,
            duration_ms,
            delay_ms: self.transition.effective_delay_ms(),
            easing: self.transition.timing.clone(),
        };
        let progress = Tween::new(self.state.current, target, &self.transition, duration_ms, now);
        let angle = Tween::new(
            self.state.angle,
            angle_for(target),
            &self.transition,
            duration_ms,
            now,
        );

        log::debug!(
            "animating progress {:.3} -> {:.3} over {:.1}ms",
            self.state.current,
            target,
            duration_ms
        );

        self.active = Some(ActiveTransition {
            progress,
            angle,
            request: request.clone(),
        });
        self.last_request = Some(request);
        self.state.running = true;
        self.state.paused_value = None;
        self.phase = Phase::Animating;
    }

    /// Record the target `play` and `reset` resume toward, without starting
    /// a transition.
    pub fn queue_target(&mut self, target: f64) {
        self.last_target = clamp_fraction(target);
    }

    /// Resume toward the last requested target from wherever progress is now.
    pub fn play(&mut self, now: Instant) {
        if self.phase == Phase::Animating {
            return;
        }
        self.set_target(self.last_target, now);
    }

    /// Freeze progress at its value at `now` and cancel the transition.
    pub fn pause(&mut self, now: Instant) {
        match self.phase {
            Phase::Paused => return,
            Phase::Animating => self.advance(now),
            Phase::Idle => {}
        }
        if self.active.take().is_some() {
            log::debug!("paused progress at {:.3}", self.state.current);
        }
        self.state.running = false;
        self.state.paused_value = Some(self.state.current);
        self.phase = Phase::Paused;
    }

    /// Return to the initial value, cancelling any transition.
    ///
    /// Unless the ring should stay paused, animation toward the last target
    /// starts again immediately.
    pub fn reset(&mut self, options: ResetOptions, now: Instant) {
        self.active = None;
        self.state = ProgressState {
            current: self.initial_value,
            anchor: self.initial_value,
            angle: START_ANGLE,
            running: false,
            paused_value: None,
        };

        let paused = options
            .start_in_paused_state
            .unwrap_or(self.start_in_paused_state);
        log::debug!(
            "reset progress to {:.3} ({})",
            self.initial_value,
            if paused { "paused" } else { "resuming" }
        );

        if paused {
            self.state.paused_value = Some(self.initial_value);
            self.phase = Phase::Paused;
        } else {
            self.phase = Phase::Idle;
            self.set_target(self.last_target, now);
        }
    }

    /// Advance to `now` and return the values to render.
    pub fn tick(&mut self, now: Instant) -> ProgressSnapshot {
        self.advance(now);
        self.snapshot()
    }

    /// Values as of the last command or tick, without advancing time.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            progress: self.state.current,
            angle: self.state.angle,
            phase: self.phase,
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Animating
    }

    /// Target that `play` and `reset` animate toward.
    pub fn last_target(&self) -> f64 {
        self.last_target
    }

    /// Parameters of the most recently started transition.
    pub fn last_request(&self) -> Option<&AnimationRequest> {
        self.last_request.as_ref()
    }

    /// Instant at which the running transition will finish, if any.
    pub fn finishes_at(&self) -> Option<Instant> {
        self.active.as_ref().map(|a| a.progress.end_time())
    }

    fn advance(&mut self, now: Instant) {
        let (progress, angle, target) = match &self.active {
            Some(active) => (
                active.progress.sample(now),
                active.angle.sample(now),
                active.request.target,
            ),
            None => return,
        };

        if progress.is_finished() {
            self.active = None;
            self.state.current = target;
            self.state.angle = angle_for(target);
            self.state.anchor = target;
            self.state.running = false;
            self.phase = Phase::Idle;
            log::debug!("progress animation to {:.3} complete", target);
            if let Some(callback) = self.on_complete.as_mut() {
                callback();
            }
        } else {
            self.state.current = *progress.value();
            self.state.angle = *angle.value();
            log::trace!(
                "progress {:.4}, angle {:.4}",
                self.state.current,
                self.state.angle
            );
        }
    }
}
