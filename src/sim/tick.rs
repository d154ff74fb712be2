//! Per-frame simulation tick
//!
//! One call per rendered frame. Egg speeds are per frame, so a higher frame
//! rate from the difficulty pacing makes the whole game faster.

use super::autopilot;
use super::difficulty::DifficultyChange;
use super::egg::EggStep;
use super::sprite::Sprite;
use super::state::{EndReason, GameEvent, GamePhase, GameState, Message, WolfPose};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Milliseconds since the previous frame (drives the spawn timer and effects)
    pub elapsed_ms: u32,
    /// Move the wolf's basket
    pub pose: Option<WolfPose>,
    /// Power button (turns the game on, or ends a running session)
    pub power: bool,
    /// Pause button
    pub pause: bool,
    /// Help button
    pub help: bool,
    /// Sound switch
    pub sound: bool,
    /// Hold or release egg spawning
    pub hold_spawning: bool,
    /// Demo mode - the autopilot moves the wolf
    pub autopilot: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Nothing moves once the session is over
    if state.is_over() {
        return;
    }

    state.time_ticks += 1;
    state.time_ms += u64::from(input.elapsed_ms);

    if !state.controls.paused {
        update_difficulty(state);
    }

    apply_controls(state, input);
    if state.is_over() {
        return;
    }

    for _ in 0..state.spawn_timer.advance(input.elapsed_ms) {
        state.messages.push_back(Message::Spawn);
    }

    dispatch_messages(state);

    if state.is_active() {
        update_sprites(state);
    }
}

/// Step the difficulty controller and retime the spawn timer if needed
fn update_difficulty(state: &mut GameState) {
    match state.difficulty.evaluate(state.score) {
        Some(DifficultyChange::TierAdvanced { tier }) => {
            let background = state.difficulty.background().to_string();
            state.events.push(GameEvent::TierAdvanced { tier, background });
        }
        Some(DifficultyChange::OverrideFired { threshold }) => {
            state.events.push(GameEvent::OverrideFired { threshold });
        }
        None => {}
    }

    let interval_ms = state.difficulty.spawn_interval_ms();
    if interval_ms != state.spawn_timer.interval_ms() {
        state.spawn_timer.reset(interval_ms);
        state.events.push(GameEvent::SpawnIntervalChanged { interval_ms });
    }
}

/// Buttons, switches and keys
fn apply_controls(state: &mut GameState, input: &TickInput) {
    if input.sound {
        state.controls.sound_on = !state.controls.sound_on;
        state.events.push(GameEvent::SoundToggled(state.controls.sound_on));
    }

    if input.power {
        if state.controls.help_visible {
            state.events.push(GameEvent::Denied);
        } else if state.controls.powered {
            end_session(state, EndReason::PoweredOff);
            return;
        } else {
            state.controls.powered = true;
            state.phase = GamePhase::Running;
            state.events.push(GameEvent::PoweredOn);
        }
    }

    if input.pause {
        if state.controls.powered && !state.controls.help_visible {
            state.controls.paused = !state.controls.paused;
            state.events.push(GameEvent::PauseToggled(state.controls.paused));
        } else {
            state.events.push(GameEvent::Denied);
        }
    }

    if input.help {
        state.controls.help_visible = !state.controls.help_visible;
        state.events.push(GameEvent::HelpToggled(state.controls.help_visible));
        // Reading the help pauses a running game
        if state.controls.help_visible && state.controls.powered && !state.controls.paused {
            state.controls.paused = true;
            state.events.push(GameEvent::PauseToggled(true));
        }
    }

    // Keys are ignored while paused
    if state.controls.paused {
        return;
    }

    if input.hold_spawning {
        state.controls.spawning_held = !state.controls.spawning_held;
        if state.controls.spawning_held {
            state.spawn_timer.stop();
        } else {
            state.spawn_timer.start();
        }
        state.events.push(GameEvent::SpawningHeld(state.controls.spawning_held));
    }

    let pose = if input.autopilot {
        autopilot::choose_pose(state).or(input.pose)
    } else {
        input.pose
    };
    if let Some(pose) = pose {
        if pose != state.wolf {
            state.set_pose(pose);
            state.events.push(GameEvent::PoseChanged(pose));
        }
    }
}

/// Drain the message queue once. Spawns are dropped unless the game is
/// powered and unpaused; catches and misses always count. Losing the last
/// life ends the session once the queue is empty.
fn dispatch_messages(state: &mut GameState) {
    let mut out_of_lives = false;
    while let Some(message) = state.messages.pop_front() {
        match message {
            Message::Spawn => {
                if state.is_active() && !out_of_lives {
                    let (id, tray) = state.spawn_egg();
                    state.events.push(GameEvent::EggSpawned { id, tray });
                }
            }
            Message::Catch => {
                state.score += 1;
                state.events.push(GameEvent::ScoreChanged { score: state.score });
            }
            Message::Miss if out_of_lives => {}
            Message::Miss => {
                state.lives = state.lives.saturating_sub(1);
                state.remove_chicken();
                state.events.push(GameEvent::LifeLost {
                    remaining: state.lives,
                });
                out_of_lives = state.lives == 0;
            }
        }
    }

    if out_of_lives {
        end_session(state, EndReason::OutOfLives);
    }
}

/// Move eggs, expire effects. Outcomes are queued for the next tick.
fn update_sprites(state: &mut GameState) {
    let catch_point = state.catch_point();
    let now = state.time_ms;
    let mut broken = Vec::new();

    let GameState {
        sprites,
        messages,
        tuning,
        events,
        ..
    } = state;

    sprites.retain_mut(|sprite| match sprite {
        Sprite::Egg(egg) => match egg.step(catch_point, tuning) {
            EggStep::Moving => true,
            EggStep::Caught => {
                messages.push_back(Message::Catch);
                events.push(GameEvent::EggCaught { id: egg.id });
                false
            }
            EggStep::Missed { side } => {
                messages.push_back(Message::Miss);
                broken.push((egg.id, side));
                false
            }
        },
        Sprite::Effect(effect) => !effect.expired(now),
        Sprite::Decor(_) => true,
    });

    for (id, side) in broken {
        state.spawn_broken_egg(side);
        state.events.push(GameEvent::EggBroken { id, side });
    }
}

fn end_session(state: &mut GameState, reason: EndReason) {
    state.phase = GamePhase::Finished(reason);
    state.spawn_timer.stop();
    state.messages.clear();
    state.events.push(GameEvent::GameOver {
        score: state.score,
        reason,
    });
    log::info!("Session over ({:?}) with score {}", reason, state.score);
}
