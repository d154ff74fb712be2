//! Demo-mode player
//!
//! Guards the tray whose egg will reach its basket soonest. It never looks
//! further ahead than that, so two eggs due at once on different trays beat it.

use super::egg::Egg;
use super::state::{GameState, WolfPose};
use crate::tuning::Tuning;

/// Frames until the egg's top edge drops past its basket height
fn frames_to_basket(egg: &Egg, tuning: &Tuning) -> f32 {
    let basket = WolfPose::guarding(egg.tray).catch_point(tuning);
    let fall = egg.velocity(tuning).y.max(f32::EPSILON);
    (basket.y - egg.pos.y).max(0.0) / fall
}

/// Pick the pose for the most urgent egg, if any egg is in play
pub fn choose_pose(state: &GameState) -> Option<WolfPose> {
    state
        .eggs()
        .min_by(|a, b| {
            frames_to_basket(a, &state.tuning)
                .partial_cmp(&frames_to_basket(b, &state.tuning))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|egg| WolfPose::guarding(egg.tray))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::egg::Tray;
    use crate::sim::sprite::Sprite;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_no_eggs_no_opinion() {
        let state = GameState::new(Tuning::default(), 1).unwrap();
        assert_eq!(choose_pose(&state), None);
    }

    #[test]
    fn test_prefers_egg_closer_to_its_basket() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        let fresh = Egg::launch(100, Tray::LeftUpper, &state.tuning);
        let mut late = Egg::launch(101, Tray::RightLower, &state.tuning);
        late.pos.y += 150.0;
        state.sprites.push(Sprite::Egg(fresh));
        state.sprites.push(Sprite::Egg(late));

        assert_eq!(choose_pose(&state), Some(WolfPose::RightBottom));
    }

    #[test]
    fn test_autopilot_scores() {
        let mut state = GameState::new(Tuning::default(), 21).unwrap();
        tick(
            &mut state,
            &TickInput {
                power: true,
                elapsed_ms: 20,
                ..Default::default()
            },
        );
        let input = TickInput {
            elapsed_ms: 20,
            autopilot: true,
            ..Default::default()
        };
        // A little over a minute of play at the opening pace
        for _ in 0..3_500 {
            tick(&mut state, &input);
        }
        assert!(state.score >= 10, "score {}", state.score);
    }
}
