// ============================================================================
// Cross-thread command funnel
// ============================================================================
//
// Hosts on other threads never touch the controller. They push commands into
// a channel through a cloneable `RingHandle`; the owning `ProgressRing` drains
// the channel at the start of every tick and applies them in order.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Instant;

use crate::controller::ResetOptions;
use crate::error::CommandError;

/// Command a host can issue to a progress ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingCommand {
    /// Animate towards a percentage (0-100)
    SetProgress(f64),
    Play,
    Pause,
    Reset(ResetOptions),
}

/// A command together with the instant it was issued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamped {
    pub command: RingCommand,
    pub issued_at: Instant,
}

/// Cloneable, `Send` sender of [`RingCommand`]s.
#[derive(Debug, Clone)]
pub struct RingHandle {
    tx: Sender<Stamped>,
}

impl RingHandle {
    /// Queue a command stamped with the current time.
    pub fn send(&self, command: RingCommand) -> Result<(), CommandError> {
        self.send_at(command, Instant::now())
    }

    /// Queue a command that was issued at `issued_at`.
    pub fn send_at(&self, command: RingCommand, issued_at: Instant) -> Result<(), CommandError> {
        self.tx
            .send(Stamped { command, issued_at })
            .map_err(|_| CommandError::Disconnected)
    }

    pub fn set_progress(&self, percent: f64) -> Result<(), CommandError> {
        self.send(RingCommand::SetProgress(percent))
    }

    pub fn play(&self) -> Result<(), CommandError> {
        self.send(RingCommand::Play)
    }

    pub fn pause(&self) -> Result<(), CommandError> {
        self.send(RingCommand::Pause)
    }

    pub fn reset(&self, options: ResetOptions) -> Result<(), CommandError> {
        self.send(RingCommand::Reset(options))
    }
}

/// Receiving end, owned by the ring.
#[derive(Debug)]
pub(crate) struct CommandQueue {
    tx: Sender<Stamped>,
    rx: Receiver<Stamped>,
}

impl CommandQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub(crate) fn handle(&self) -> RingHandle {
        RingHandle {
            tx: self.tx.clone(),
        }
    }

    /// Take every command queued so far, oldest first.
    pub(crate) fn drain(&self) -> Vec<Stamped> {
        let mut commands = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(cmd) => commands.push(cmd),
                // The queue keeps its own sender, so the channel never disconnects
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_drain_preserves_order() {
        let queue = CommandQueue::new();
        let handle = queue.handle();
        handle.set_progress(40.0).unwrap();
        handle.pause().unwrap();
        handle.reset(ResetOptions::paused()).unwrap();

        let commands: Vec<_> = queue.drain().into_iter().map(|s| s.command).collect();
        assert_eq!(
            commands,
            vec![
                RingCommand::SetProgress(40.0),
                RingCommand::Pause,
                RingCommand::Reset(ResetOptions::paused()),
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_handle_works_across_threads() {
        let queue = CommandQueue::new();
        let handle = queue.handle();
        let at = Instant::now() + Duration::from_millis(5);
        std::thread::spawn(move || handle.send_at(RingCommand::Play, at))
            .join()
            .unwrap()
            .unwrap();
        let drained = queue.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].issued_at, at);
    }

    #[test]
    fn test_send_after_drop_is_disconnected() {
        let handle = CommandQueue::new().handle();
        assert_eq!(handle.play(), Err(CommandError::Disconnected));
    }
}
