use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use progress_ring::prelude::*;

const FRAME: Duration = Duration::from_micros(16_667);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Track fades from gold to tomato as the ring fills
    let config = RingConfig::ring()
        .size(120.0)
        .track_width(12.0)
        .inactive_track_width(16.0)
        .theme(Theme::Dark)
        .track_gradient(vec![
            ColorStop::parse(0.0, "gold")?,
            ColorStop::parse(100.0, "#ff6347")?,
        ]);
    let animation = AnimationConfig::ring().duration(600.0);

    let start = Instant::now();
    let mut ring = ProgressRing::new(80.0, config, animation, start)?;

    let completed = Arc::new(AtomicUsize::new(0));
    let counter = completed.clone();
    ring.on_animation_complete(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let handle = ring.handle();
    let mut now = start;
    for frame_index in 0..90 {
        // Pause a third of the way in and resume a few frames later
        match frame_index {
            12 => handle.send_at(RingCommand::Pause, now)?,
            24 => handle.send_at(RingCommand::Play, now)?,
            60 => handle.send_at(RingCommand::SetProgress(30.0), now)?,
            _ => {}
        }

        let frame = ring.tick(now);
        if frame_index % 6 == 0 {
            print_frame(frame_index, frame);
        }
        now += FRAME;
    }

    println!(
        "completed transitions: {}",
        completed.load(Ordering::SeqCst)
    );
    Ok(())
}

fn print_frame(index: usize, frame: &RingFrame) {
    let halves = match (
        frame.visibility.contains(Visibility::RIGHT_HALF),
        frame.visibility.contains(Visibility::LEFT_HALF),
    ) {
        (false, _) => "empty",
        (true, false) => "right",
        (true, true) => "both",
    };
    println!(
        "frame {:>3}  {:>6.2}%  {:?}  halves={:<5}  color={}  shapes={}",
        index,
        frame.progress * 100.0,
        frame.phase,
        halves,
        frame.track_color.to_hex_string(),
        frame.instances().len()
    );
}
