//! Game state and core simulation types
//!
//! Everything the main loop mutates lives in `GameState`; there is no
//! process-wide state.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyController;
use super::egg::{Egg, Side, Tray};
use super::sprite::{BrokenEgg, Decor, DecorKind, Sprite};
use super::timer::SpawnTimer;
use crate::error::TuningError;
use crate::tuning::Tuning;

/// Where the wolf holds its basket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WolfPose {
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
}

impl WolfPose {
    pub const ALL: [WolfPose; 4] = [
        WolfPose::LeftTop,
        WolfPose::RightTop,
        WolfPose::LeftBottom,
        WolfPose::RightBottom,
    ];

    /// Index into `Tuning::catch_points`
    pub fn index(self) -> usize {
        match self {
            WolfPose::LeftTop => 0,
            WolfPose::RightTop => 1,
            WolfPose::LeftBottom => 2,
            WolfPose::RightBottom => 3,
        }
    }

    pub fn catch_point(self, tuning: &Tuning) -> Vec2 {
        tuning.catch_points[self.index()]
    }

    /// The pose that guards a tray
    pub fn guarding(tray: Tray) -> Self {
        match tray {
            Tray::LeftUpper => WolfPose::LeftTop,
            Tray::LeftLower => WolfPose::LeftBottom,
            Tray::RightUpper => WolfPose::RightTop,
            Tray::RightLower => WolfPose::RightBottom,
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Last life lost
    OutOfLives,
    /// Power button pressed while the game was on
    PoweredOff,
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the power button; no eggs spawn
    Standby,
    /// Eggs spawn and move (unless paused)
    Running,
    /// Session over
    Finished(EndReason),
}

/// Console switches and buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub sound_on: bool,
    pub powered: bool,
    pub paused: bool,
    pub help_visible: bool,
    /// Egg spawning is held off
    pub spawning_held: bool,
}

/// Internal signals consumed once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Message {
    /// Spawn timer fired
    Spawn,
    /// An egg landed in the basket
    Catch,
    /// An egg hit the floor
    Miss,
}

/// Outbound notifications for the presentation layer (sounds, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EggSpawned { id: u32, tray: Tray },
    EggCaught { id: u32 },
    EggBroken { id: u32, side: Side },
    ScoreChanged { score: u32 },
    LifeLost { remaining: u8 },
    TierAdvanced { tier: usize, background: String },
    OverrideFired { threshold: u32 },
    SpawnIntervalChanged { interval_ms: u32 },
    PoseChanged(WolfPose),
    SoundToggled(bool),
    PoweredOn,
    PauseToggled(bool),
    HelpToggled(bool),
    SpawningHeld(bool),
    /// A button press that is not allowed right now
    Denied,
    GameOver { score: u32, reason: EndReason },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Layout and balance data
    pub tuning: Tuning,
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub score: u32,
    pub lives: u8,
    pub phase: GamePhase,
    pub controls: Controls,
    pub wolf: WolfPose,
    pub difficulty: DifficultyController,
    pub spawn_timer: SpawnTimer,
    /// Sprite group in draw order
    pub sprites: Vec<Sprite>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Session clock in milliseconds
    pub time_ms: u64,
    /// Events produced by the last tick
    pub events: Vec<GameEvent>,
    pub(crate) messages: VecDeque<Message>,
    next_id: u32,
}

impl GameState {
    /// Create a new session. The wolf starts in a random pose.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let difficulty = DifficultyController::new(tuning.tiers.clone(), tuning.late_overrides.clone())
            .ok_or(TuningError::NoTiers)?;
        let spawn_timer = SpawnTimer::new(difficulty.spawn_interval_ms());

        let mut rng = Pcg32::seed_from_u64(seed);
        let wolf = WolfPose::ALL[rng.random_range(0..WolfPose::ALL.len())];

        let mut state = Self {
            lives: tuning.lives,
            tuning,
            seed,
            rng,
            score: 0,
            phase: GamePhase::Standby,
            controls: Controls::default(),
            wolf,
            difficulty,
            spawn_timer,
            sprites: Vec::new(),
            time_ticks: 0,
            time_ms: 0,
            events: Vec::new(),
            messages: VecDeque::new(),
            next_id: 1,
        };

        let id = state.next_entity_id();
        let pos = state.wolf_position(wolf);
        state.sprites.push(Sprite::Decor(Decor {
            id,
            kind: DecorKind::Wolf(wolf),
            pos,
        }));

        for slot in 0..state.lives {
            let id = state.next_entity_id();
            let pos = state.tuning.chicken_origin + Vec2::new(state.tuning.chicken_spacing * f32::from(slot), 0.0);
            state.sprites.push(Sprite::Decor(Decor {
                id,
                kind: DecorKind::Chicken { slot },
                pos,
            }));
        }

        Ok(state)
    }

    /// Allocate a new sprite ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Finished(_))
    }

    /// Eggs move and spawn only while running and not paused
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Running && !self.controls.paused
    }

    /// Frame rate the main loop should run at
    pub fn target_fps(&self) -> u32 {
        self.difficulty.target_fps(self.tuning.base_fps)
    }

    /// Background art for the current tier
    pub fn background(&self) -> &str {
        self.difficulty.background()
    }

    pub fn catch_point(&self) -> Vec2 {
        self.wolf.catch_point(&self.tuning)
    }

    pub fn eggs(&self) -> impl Iterator<Item = &Egg> {
        self.sprites.iter().filter_map(Sprite::as_egg)
    }

    fn wolf_position(&self, pose: WolfPose) -> Vec2 {
        if pose == WolfPose::RightBottom {
            self.tuning.wolf_point - Vec2::new(self.tuning.wolf_right_bottom_shift, 0.0)
        } else {
            self.tuning.wolf_point
        }
    }

    /// Move the wolf's basket
    pub fn set_pose(&mut self, pose: WolfPose) {
        self.wolf = pose;
        let pos = self.wolf_position(pose);
        for sprite in &mut self.sprites {
            if let Sprite::Decor(decor) = sprite {
                if let DecorKind::Wolf(_) = decor.kind {
                    decor.kind = DecorKind::Wolf(pose);
                    decor.pos = pos;
                }
            }
        }
    }

    /// Put a new egg at the head of a random tray
    pub fn spawn_egg(&mut self) -> (u32, Tray) {
        let tray = Tray::ALL[self.rng.random_range(0..Tray::ALL.len())];
        let id = self.next_entity_id();
        self.sprites.push(Sprite::Egg(Egg::launch(id, tray, &self.tuning)));
        (id, tray)
    }

    /// Leave a broken egg on the floor on the given side
    pub fn spawn_broken_egg(&mut self, side: Side) -> u32 {
        let jitter = self.rng.random_range(0..=self.tuning.break_jitter);
        let id = self.next_entity_id();
        let pos = self.tuning.break_points[side.index()] + Vec2::new(0.0, jitter as f32);
        self.sprites.push(Sprite::Effect(BrokenEgg {
            id,
            side,
            pos,
            born_ms: self.time_ms,
            ttl_ms: self.tuning.break_effect_ms,
        }));
        id
    }

    /// Remove the leftmost remaining chicken
    pub fn remove_chicken(&mut self) {
        let leftmost = self
            .sprites
            .iter()
            .enumerate()
            .filter_map(|(i, s)| match s {
                Sprite::Decor(Decor {
                    kind: DecorKind::Chicken { slot },
                    ..
                }) => Some((i, *slot)),
                _ => None,
            })
            .min_by_key(|&(_, slot)| slot)
            .map(|(i, _)| i);
        if let Some(i) = leftmost {
            self.sprites.remove(i);
        }
    }

    /// Number of chickens still shown
    pub fn chickens(&self) -> usize {
        self.sprites
            .iter()
            .filter(|s| {
                matches!(
                    s,
                    Sprite::Decor(Decor {
                        kind: DecorKind::Chicken { .. },
                        ..
                    })
                )
            })
            .count()
    }
}
