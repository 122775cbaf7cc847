//! An animated circular progress ring.
//!
//! The crate does not paint anything itself. [`ProgressRing`] owns the
//! animation state and turns it into a [`RingFrame`] every tick: a list of
//! rounded rectangles (two rotating half-discs, masks and optional rounded
//! tips) that any 2D or GPU backend can draw.
//!
//! ```ignore
//! use std::time::{Duration, Instant};
//! use progress_ring::prelude::*;
//!
//! let start = Instant::now();
//! let mut ring = ProgressRing::new(
//!     75.0,
//!     RingConfig::default().radius(60.0).track_width(10.0).inactive_track_width(14.0),
//!     AnimationConfig::ring().duration(500.0),
//!     start,
//! )?;
//!
//! // From another thread
//! let handle = ring.handle();
//! handle.pause()?;
//!
//! // In the render loop
//! let frame = ring.tick(start + Duration::from_millis(16));
//! for instance in frame.instances() {
//!     // upload and draw
//! }
//! ```

pub mod animation;
pub mod color;
pub mod command;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod renderer;
pub mod transform;

use std::time::Instant;

use command::{CommandQueue, RingCommand, RingHandle};
use controller::{normalize, AnimationConfig, AnimationController, ProgressSnapshot, ResetOptions};
use error::ConfigError;
use geometry::{RingConfig, RingLayout};
use renderer::{RingFrame, RingRenderer};

pub use error::Result;

pub mod prelude {
    pub use crate::animation::{TimingFunction, Transition};
    pub use crate::color::{Color, Theme};
    pub use crate::command::{RingCommand, RingHandle};
    pub use crate::controller::{AnimationConfig, Phase, ProgressSnapshot, ResetOptions};
    pub use crate::error::{ColorParseError, CommandError, ConfigError};
    pub use crate::geometry::{RingConfig, RingLayout, TipVariant};
    pub use crate::gradient::{ColorSpace, ColorStop, GradientRamp, TrackColor};
    pub use crate::renderer::{LayerKind, RingFrame, ShapeInstance, Visibility};
    pub use crate::ProgressRing;
}

/// One progress ring: geometry, animation state and the last rendered frame.
///
/// All methods take the instant they happen at. Commands from other threads
/// go through a [`RingHandle`] and are applied at the start of the next
/// [`tick`](Self::tick).
pub struct ProgressRing {
    config: RingConfig,
    renderer: RingRenderer,
    controller: AnimationController,
    commands: CommandQueue,
    last_tick: Instant,
    /// Instant the most recent command was applied at
    last_command: Instant,
    frame: RingFrame,
}

impl ProgressRing {
    /// Create a ring and, unless configured to start paused, begin animating
    /// from the initial value toward `progress` (a percentage).
    pub fn new(
        progress: f64,
        config: RingConfig,
        animation: AnimationConfig,
        now: Instant,
    ) -> Result<Self> {
        let renderer = RingRenderer::new(&config)?;
        let paused = animation.start_in_paused_state;
        let mut controller = AnimationController::new(animation);
        let target = progress_fraction(progress);
        if paused {
            controller.queue_target(target);
        } else {
            controller.set_target(target, now);
        }
        let frame = renderer.frame(&controller.snapshot());

        log::debug!(
            "created progress ring: radius {}, target {:.3}{}",
            config.radius,
            target,
            if paused { " (paused)" } else { "" }
        );

        Ok(Self {
            config,
            renderer,
            controller,
            commands: CommandQueue::new(),
            last_tick: now,
            last_command: now,
            frame,
        })
    }

    /// Sender for issuing commands from other threads.
    pub fn handle(&self) -> RingHandle {
        self.commands.handle()
    }

    /// Register a callback run each time a transition reaches its target.
    pub fn on_animation_complete<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.controller.set_on_complete(callback);
    }

    /// Animate toward `percent` (0-100, clamped).
    pub fn set_progress(&mut self, percent: f64, now: Instant) {
        self.apply(RingCommand::SetProgress(percent), now);
    }

    pub fn play(&mut self, now: Instant) {
        self.apply(RingCommand::Play, now);
    }

    pub fn pause(&mut self, now: Instant) {
        self.apply(RingCommand::Pause, now);
    }

    pub fn reset(&mut self, options: ResetOptions, now: Instant) {
        self.apply(RingCommand::Reset(options), now);
    }

    /// Apply queued commands, advance the animation to `now` and render.
    ///
    /// Time never runs backwards: an instant earlier than the previous tick
    /// or command is treated as that instant.
    pub fn tick(&mut self, now: Instant) -> &RingFrame {
        let now = self.clamp_time(now);
        self.drain_commands(now);
        self.last_tick = now;
        let snapshot = self.controller.tick(now);
        self.frame = self.renderer.frame(&snapshot);
        &self.frame
    }

    /// Replace the ring's appearance, keeping the animation state.
    pub fn set_config(&mut self, config: RingConfig) -> std::result::Result<(), ConfigError> {
        self.renderer = RingRenderer::new(&config)?;
        self.config = config;
        self.frame = self.renderer.frame(&self.controller.snapshot());
        Ok(())
    }

    /// Replace timing and reset options. A running transition finishes with
    /// the parameters it started with.
    pub fn set_animation_config(&mut self, animation: AnimationConfig) {
        self.controller.set_config(animation);
    }

    /// Frame produced by the last tick or command.
    pub fn frame(&self) -> &RingFrame {
        &self.frame
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.controller.snapshot()
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    pub fn layout(&self) -> &RingLayout {
        self.renderer.layout()
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    /// Apply a direct command after everything queued before it.
    fn apply(&mut self, command: RingCommand, now: Instant) {
        let now = self.clamp_time(now);
        self.drain_commands(now);
        self.dispatch(command, now);
        self.last_command = now;
        self.frame = self.renderer.frame(&self.controller.snapshot());
    }

    fn clamp_time(&self, now: Instant) -> Instant {
        now.max(self.last_tick).max(self.last_command)
    }

    /// Dispatch queued commands in order, each at its issue instant clamped
    /// to `[last_command, now]`.
    fn drain_commands(&mut self, now: Instant) {
        for stamped in self.commands.drain() {
            let at = stamped.issued_at.max(self.last_command).min(now);
            self.dispatch(stamped.command, at);
            self.last_command = at;
        }
    }

    fn dispatch(&mut self, command: RingCommand, at: Instant) {
        log::trace!("applying {:?}", command);
        match command {
            RingCommand::SetProgress(percent) => {
                self.controller.set_target(progress_fraction(percent), at)
            }
            RingCommand::Play => self.controller.play(at),
            RingCommand::Pause => self.controller.pause(at),
            RingCommand::Reset(options) => self.controller.reset(options, at),
        }
    }
}

fn progress_fraction(percent: f64) -> f64 {
    if !(0.0..=100.0).contains(&percent) {
        log::warn!("progress {} is outside 0..=100, clamping", percent);
    }
    normalize(percent)
}
