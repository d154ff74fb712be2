//! Frame limiter
//!
//! Sleeps out the rest of each frame so the loop runs at the requested rate,
//! then reports how long the frame actually took. The simulation only ever
//! sees the returned milliseconds.

use std::thread;
use std::time::{Duration, Instant};

/// Longest frame reported to the simulation (after a stall or a debugger break)
const MAX_FRAME_MS: u32 = 100;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

pub struct FrameClock {
    last: Instant,
    frame_times: [Option<Instant>; FPS_WINDOW],
    frame_index: usize,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
        }
    }

    /// Wait for the next frame at `fps` and return the elapsed milliseconds
    pub fn tick(&mut self, fps: u32) -> u32 {
        let budget = Duration::from_secs(1) / fps.max(1);
        let spent = self.last.elapsed();
        if spent < budget {
            thread::sleep(budget - spent);
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;

        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        u32::try_from(elapsed.as_millis())
            .unwrap_or(MAX_FRAME_MS)
            .min(MAX_FRAME_MS)
    }

    /// Average frame rate over the last window, once the window is full
    pub fn measured_fps(&self) -> Option<f32> {
        // The slot about to be overwritten holds the oldest frame
        let oldest = self.frame_times[self.frame_index]?;
        let newest = self.frame_times[(self.frame_index + FPS_WINDOW - 1) % FPS_WINDOW]?;
        let span = newest.duration_since(oldest).as_secs_f32();
        (span > 0.0).then(|| (FPS_WINDOW - 1) as f32 / span)
    }
}
