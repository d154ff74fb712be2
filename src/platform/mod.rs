//! Platform abstraction layer
//!
//! Native-only pieces the simulation must not touch directly:
//! - Frame pacing (wall-clock time and sleeping)

pub mod clock;

pub use clock::FrameClock;
