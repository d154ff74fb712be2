//! Wolf Eggs launcher
//!
//! Headless attract mode: plays one session with the autopilot guarding the
//! trays, records the result for the current player and prints the board.
//! The sprite group is what a renderer would draw each frame.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use wolf_eggs::platform::FrameClock;
use wolf_eggs::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use wolf_eggs::{Settings, StoreError, Tuning, UserStore, settings};

const DEFAULT_PLAYER: &str = "player";

/// One running session and its frame loop
struct Runner {
    state: GameState,
    input: TickInput,
    clock: FrameClock,
    frames: u32,
}

impl Runner {
    fn new(state: GameState, sound_on: bool) -> Self {
        // First frame switches the console on
        let input = TickInput {
            power: true,
            sound: sound_on != state.controls.sound_on,
            autopilot: true,
            ..Default::default()
        };
        Self {
            state,
            input,
            clock: FrameClock::new(),
            frames: 0,
        }
    }

    /// Run one frame at the current difficulty pacing
    fn update(&mut self) {
        self.input.elapsed_ms = self.clock.tick(self.state.target_fps());
        let input = self.input.clone();
        tick(&mut self.state, &input);
        self.frames += 1;

        // Clear one-shot inputs after processing
        self.input.power = false;
        self.input.pause = false;
        self.input.help = false;
        self.input.sound = false;
        self.input.hold_spawning = false;

        for event in &self.state.events {
            report(event);
        }
    }

    fn run(&mut self, frame_limit: u32) {
        while !self.state.is_over() {
            if self.frames >= frame_limit && self.state.phase == GamePhase::Running {
                log::info!("Demo frame limit reached, powering off");
                self.input.power = true;
            }
            self.update();
        }
        if let Some(fps) = self.clock.measured_fps() {
            log::debug!("Final frame rate {fps:.1}");
        }
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::ScoreChanged { score } => log::debug!("Score {score}"),
        GameEvent::LifeLost { remaining } => log::info!("Egg broken, {remaining} lives left"),
        GameEvent::TierAdvanced { tier, background } => {
            log::info!("Difficulty tier {tier} ({background})")
        }
        GameEvent::OverrideFired { threshold } => log::info!("Speed-up at score {threshold}"),
        GameEvent::GameOver { score, reason } => {
            log::info!("Game over ({reason:?}) with score {score}")
        }
        other => log::trace!("{other:?}"),
    }
}

fn session_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Wolf Eggs starting...");

    let mut prefs = Settings::load();

    let tuning_path = settings::tuning_path().ok();
    let tuning = Tuning::load_or_default(tuning_path.as_deref()).context("cannot load game tuning")?;

    let data_dir = settings::data_dir().context("cannot locate a data directory")?;
    let mut store = UserStore::open(&data_dir).context("cannot open the player store")?;

    let player = prefs
        .last_player
        .clone()
        .unwrap_or_else(|| DEFAULT_PLAYER.to_string());
    match store.register_user(&player) {
        Ok(user) => println!("Welcome, {}!", user.name),
        Err(StoreError::DuplicateUser(name)) => println!("Welcome back, {name}!"),
        Err(e) => return Err(e).context("cannot register player"),
    }

    let seed = session_seed();
    log::info!("Session seed {seed}");
    let state = GameState::new(tuning, seed).context("invalid game tuning")?;

    let mut runner = Runner::new(state, prefs.sound_on);
    runner.run(prefs.demo_frame_limit);

    let score = runner.state.score;
    let best = store
        .record_session(&player, score)
        .context("cannot record the session")?;
    println!("{player} scored {score} (best {best})");

    println!("\nLeaderboard");
    for (rank, user) in store.list_users()?.iter().enumerate() {
        println!("{:>3}. {:<20} {:>6}", rank + 1, user.name, user.highscore);
    }

    prefs.last_player = Some(player);
    if let Err(e) = prefs.save() {
        log::warn!("Could not save settings: {e}");
    }
    Ok(())
}
