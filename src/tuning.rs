//! Data-driven layout and balance
//!
//! Every pixel threshold and timing constant lives here. The defaults were
//! tuned by hand for a 1400x800 window and the stock art, so they are
//! plain data that a JSON file can override rather than invariants.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BASE_FPS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::TuningError;
use crate::sim::difficulty::{LateOverride, Tier};

/// Gameplay tuning data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Layout ===
    /// Egg spawn points, indexed by tray (left upper, left lower, right upper, right lower)
    pub spawn_points: [Vec2; 4],
    /// Basket positions, indexed by wolf pose (left top, right top, left bottom, right bottom)
    pub catch_points: [Vec2; 4],
    /// Where broken eggs land (left, right)
    pub break_points: [Vec2; 2],
    /// Screen x that separates left from right breakage
    pub center_x: f32,
    /// Egg hit box size
    pub egg_size: Vec2,
    /// Where the wolf stands
    pub wolf_point: Vec2,
    /// Leftward shift of the wider right-bottom wolf image
    pub wolf_right_bottom_shift: f32,
    /// First chicken of the lives display
    pub chicken_origin: Vec2,
    /// Horizontal gap between chickens
    pub chicken_spacing: f32,

    // === Trajectory ===
    /// Left-side eggs roll while their x is at or below this
    pub left_roll_limit: f32,
    /// Right-side eggs roll while their x is above this...
    pub right_roll_limit: f32,
    /// ...and at or below this
    pub right_roll_start: f32,
    /// Horizontal step per frame while rolling
    pub roll_speed_x: f32,
    /// Vertical step per frame while rolling on an upper tray
    pub roll_speed_y: f32,
    /// Subtracted from `roll_speed_y` on lower trays
    pub lower_tray_slowdown: f32,
    /// Vertical step per frame once off the tray
    pub fall_speed_y: f32,
    /// Degrees of spin per frame
    pub rotation_step: f32,
    /// An egg whose top edge passes this line is lost
    pub floor_y: f32,

    // === Effects ===
    /// Maximum random vertical offset of a broken egg
    pub break_jitter: u32,
    /// How long a broken egg stays on screen
    pub break_effect_ms: u32,

    // === Pacing ===
    /// Frames per second before pacing offsets
    pub base_fps: u32,
    /// Starting lives
    pub lives: u8,
    /// Difficulty tiers in threshold order; the first starts at score 0
    pub tiers: Vec<Tier>,
    /// Late-game overrides that fire after the tier list
    pub late_overrides: Vec<LateOverride>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_points: [
                Vec2::new(195.0, 193.0),
                Vec2::new(195.0, 385.0),
                Vec2::new(1155.0, 193.0),
                Vec2::new(1155.0, 385.0),
            ],
            catch_points: [
                Vec2::new(520.0, 451.0),
                Vec2::new(912.0, 443.0),
                Vec2::new(490.0, 615.0),
                Vec2::new(912.0, 607.0),
            ],
            break_points: [Vec2::new(450.0, 610.0), Vec2::new(840.0, 610.0)],
            center_x: SCREEN_WIDTH / 2.0,
            egg_size: Vec2::new(40.0, 50.0),
            wolf_point: Vec2::new(490.0, 340.0),
            wolf_right_bottom_shift: 40.0,
            chicken_origin: Vec2::new(SCREEN_WIDTH / 2.0 - 116.0, SCREEN_HEIGHT / 4.0),
            chicken_spacing: 80.0,

            left_roll_limit: 490.0,
            right_roll_limit: 860.0,
            right_roll_start: 1155.0,
            roll_speed_x: 2.5,
            roll_speed_y: 1.99,
            lower_tray_slowdown: 0.39,
            fall_speed_y: 3.98,
            rotation_step: 7.0,
            floor_y: 609.0,

            break_jitter: 30,
            break_effect_ms: 1000,

            base_fps: BASE_FPS,
            lives: 3,
            tiers: vec![
                Tier::new(0, 2200, 0, "level_1"),
                Tier::new(50, 1500, 5, "level_2"),
                Tier::new(100, 700, 20, "level_3"),
            ],
            late_overrides: vec![LateOverride::new(200, 600, 30), LateOverride::new(250, 200, 60)],
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning: Tuning = serde_json::from_str(&json).map_err(|source| TuningError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning if the file exists, otherwise fall back to the defaults.
    /// A file that exists but is broken is still an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, TuningError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Check the difficulty table and counters
    pub fn validate(&self) -> Result<(), TuningError> {
        let first = self.tiers.first().ok_or(TuningError::NoTiers)?;
        if first.threshold != 0 {
            return Err(TuningError::FirstTierThreshold(first.threshold));
        }
        if self.lives == 0 {
            return Err(TuningError::NoLives);
        }

        // Eggs must move down every frame
        let motion = [
            ("fall_speed_y", self.fall_speed_y),
            ("roll_speed_y", self.roll_speed_y),
            ("roll_speed_y - lower_tray_slowdown", self.roll_speed_y - self.lower_tray_slowdown),
            ("roll_speed_x", self.roll_speed_x),
            ("egg_size.x", self.egg_size.x),
            ("egg_size.y", self.egg_size.y),
        ];
        for (field, value) in motion {
            if value <= 0.0 || value.is_nan() {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let thresholds = self
            .tiers
            .iter()
            .map(|t| (t.threshold, t.spawn_interval_ms))
            .chain(
                self.late_overrides
                    .iter()
                    .map(|o| (o.threshold, o.spawn_interval_ms)),
            );

        let mut previous: Option<u32> = None;
        for (threshold, interval) in thresholds {
            if interval == 0 {
                return Err(TuningError::ZeroInterval { threshold });
            }
            if let Some(prev) = previous {
                if threshold <= prev {
                    return Err(TuningError::ThresholdOrder {
                        previous: prev,
                        next: threshold,
                    });
                }
            }
            previous = Some(threshold);
        }
        Ok(())
    }
}
