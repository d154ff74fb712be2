//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per rendered frame, elapsed time passed in
//! - Seeded RNG only
//! - Stable sprite order (insertion order)
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod egg;
pub mod sprite;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Rect, egg_caught};
pub use difficulty::{DifficultyChange, DifficultyController, LateOverride, Tier};
pub use egg::{Egg, EggStep, Side, Tray};
pub use sprite::{BrokenEgg, Decor, DecorKind, Placed, Sprite, Visual};
pub use state::{Controls, EndReason, GameEvent, GamePhase, GameState, WolfPose};
pub use tick::{TickInput, tick};
pub use timer::SpawnTimer;
