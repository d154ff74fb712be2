//! Wolf Catches Eggs - an arcade egg-catching game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (egg trajectories, difficulty, game state)
//! - `tuning`: Data-driven layout and balance
//! - `store`: SQLite player registry and session history
//! - `settings`: Player preferences
//! - `platform`: Native frame clock

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod store;
pub mod tuning;

pub use error::{SettingsError, StoreError, TuningError};
pub use settings::Settings;
pub use store::UserStore;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Target window size the default tuning was laid out for
    pub const SCREEN_WIDTH: f32 = 1400.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Frames per second before any pacing offset
    pub const BASE_FPS: u32 = 50;

    /// Application identity for config/data directories
    pub const APP_QUALIFIER: &str = "";
    pub const APP_ORGANIZATION: &str = "";
    pub const APP_NAME: &str = "wolf-eggs";
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(367.0), 7.0);
        assert_eq!(wrap_degrees(-7.0), 353.0);
        assert_eq!(wrap_degrees(-360.0), 0.0);
    }
}
