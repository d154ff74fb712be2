//! Repeating spawn timer driven by frame elapsed time

/// A repeating millisecond timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnTimer {
    interval_ms: u32,
    elapsed_ms: u32,
    running: bool,
}

impl SpawnTimer {
    /// Create a running timer
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            running: true,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply a new interval and restart the countdown. A stopped timer stays stopped.
    pub fn reset(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
        self.elapsed_ms = 0;
    }

    /// Stop firing
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    /// Resume firing with a fresh countdown
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed_ms = 0;
    }

    /// Advance by `elapsed_ms`, returning how many times the timer fired
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let fired = self.elapsed_ms / self.interval_ms;
        self.elapsed_ms %= self.interval_ms;
        fired
    }
}
