//! Egg trajectory
//!
//! An egg rolls along its tray toward the centre, then drops straight down.
//! Each step first checks the wolf's basket against the egg's current hit box,
//! then moves, then checks the floor line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, egg_caught};
use crate::tuning::Tuning;
use crate::wrap_degrees;

/// Which half of the screen an egg belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Direction sign: left eggs are -1, right eggs are +1.
    /// Eggs travel opposite to their sign, toward the centre.
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// The four trays eggs roll down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tray {
    LeftUpper,
    LeftLower,
    RightUpper,
    RightLower,
}

impl Tray {
    pub const ALL: [Tray; 4] = [
        Tray::LeftUpper,
        Tray::LeftLower,
        Tray::RightUpper,
        Tray::RightLower,
    ];

    /// Index into `Tuning::spawn_points`
    pub fn index(self) -> usize {
        match self {
            Tray::LeftUpper => 0,
            Tray::LeftLower => 1,
            Tray::RightUpper => 2,
            Tray::RightLower => 3,
        }
    }

    pub fn side(self) -> Side {
        match self {
            Tray::LeftUpper | Tray::LeftLower => Side::Left,
            Tray::RightUpper | Tray::RightLower => Side::Right,
        }
    }

    pub fn is_upper(self) -> bool {
        matches!(self, Tray::LeftUpper | Tray::RightUpper)
    }
}

/// Outcome of a single egg step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggStep {
    /// Still in play
    Moving,
    /// Basket covered the egg this tick; remove it
    Caught,
    /// Egg crossed the floor line on this side of the screen; remove it
    Missed { side: Side },
}

/// A single egg in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Egg {
    pub id: u32,
    pub tray: Tray,
    /// Top-left of the hit box
    pub pos: Vec2,
    /// Visual spin in degrees, [0, 360)
    pub rotation: f32,
    /// -1 for left trays, +1 for right trays
    pub direction: f32,
    pub size: Vec2,
}

impl Egg {
    /// Place a new egg at the head of its tray
    pub fn launch(id: u32, tray: Tray, tuning: &Tuning) -> Self {
        Self {
            id,
            tray,
            pos: tuning.spawn_points[tray.index()],
            rotation: 0.0,
            direction: tray.side().direction(),
            size: tuning.egg_size,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Whether the egg is still on its tray
    pub fn is_rolling(&self, tuning: &Tuning) -> bool {
        match self.tray.side() {
            Side::Left => self.pos.x <= tuning.left_roll_limit,
            Side::Right => self.pos.x > tuning.right_roll_limit && self.pos.x <= tuning.right_roll_start,
        }
    }

    /// Displacement for the next tick
    pub fn velocity(&self, tuning: &Tuning) -> Vec2 {
        if self.is_rolling(tuning) {
            let dy = if self.tray.is_upper() {
                tuning.roll_speed_y
            } else {
                tuning.roll_speed_y - tuning.lower_tray_slowdown
            };
            Vec2::new(-self.direction * tuning.roll_speed_x, dy)
        } else {
            Vec2::new(0.0, tuning.fall_speed_y)
        }
    }

    /// Advance one tick against the basket at `catch_point`
    pub fn step(&mut self, catch_point: Vec2, tuning: &Tuning) -> EggStep {
        self.rotation = wrap_degrees(self.rotation + tuning.rotation_step * self.direction);

        if egg_caught(&self.hitbox(), catch_point) {
            return EggStep::Caught;
        }

        self.pos += self.velocity(tuning);

        if self.pos.y > tuning.floor_y {
            let side = if self.pos.x < tuning.center_x {
                Side::Left
            } else {
                Side::Right
            };
            EggStep::Missed { side }
        } else {
            EggStep::Moving
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::WolfPose;
    use proptest::prelude::*;

    const MAX_STEPS: usize = 2_000;

    /// Step an egg until it leaves play
    fn run(tray: Tray, pose: WolfPose, tuning: &Tuning) -> (EggStep, Egg) {
        let mut egg = Egg::launch(1, tray, tuning);
        let catch_point = pose.catch_point(tuning);
        for _ in 0..MAX_STEPS {
            match egg.step(catch_point, tuning) {
                EggStep::Moving => {}
                outcome => return (outcome, egg),
            }
        }
        panic!("egg never left play");
    }

    fn matching_pose(tray: Tray) -> WolfPose {
        match tray {
            Tray::LeftUpper => WolfPose::LeftTop,
            Tray::LeftLower => WolfPose::LeftBottom,
            Tray::RightUpper => WolfPose::RightTop,
            Tray::RightLower => WolfPose::RightBottom,
        }
    }

    #[test]
    fn test_direction_sign_by_side() {
        let tuning = Tuning::default();
        for tray in Tray::ALL {
            let egg = Egg::launch(1, tray, &tuning);
            match tray.side() {
                Side::Left => assert_eq!(egg.direction, -1.0),
                Side::Right => assert_eq!(egg.direction, 1.0),
            }
        }
    }

    #[test]
    fn test_rolls_toward_centre_then_falls() {
        let tuning = Tuning::default();
        let mut egg = Egg::launch(1, Tray::LeftUpper, &tuning);
        let nowhere = Vec2::new(-100.0, -100.0);

        egg.step(nowhere, &tuning);
        assert!((egg.pos - Vec2::new(197.5, 194.99)).length() < 1e-3);

        while egg.is_rolling(&tuning) {
            egg.step(nowhere, &tuning);
        }
        let x = egg.pos.x;
        egg.step(nowhere, &tuning);
        assert_eq!(egg.pos.x, x, "free fall has no horizontal movement");
    }

    #[test]
    fn test_lower_tray_rolls_slower() {
        let tuning = Tuning::default();
        let upper = Egg::launch(1, Tray::RightUpper, &tuning);
        let lower = Egg::launch(2, Tray::RightLower, &tuning);
        assert!(lower.velocity(&tuning).y < upper.velocity(&tuning).y);
        assert_eq!(upper.velocity(&tuning).x, -2.5);
    }

    #[test]
    fn test_rotation_wraps_with_direction() {
        let tuning = Tuning::default();
        let mut egg = Egg::launch(1, Tray::LeftUpper, &tuning);
        egg.step(Vec2::ZERO, &tuning);
        assert_eq!(egg.rotation, 353.0);

        let mut egg = Egg::launch(2, Tray::RightUpper, &tuning);
        for _ in 0..52 {
            egg.step(Vec2::ZERO, &tuning);
        }
        assert_eq!(egg.rotation, (52.0 * 7.0) % 360.0);
    }

    #[test]
    fn test_matching_pose_catches_every_tray() {
        let tuning = Tuning::default();
        for tray in Tray::ALL {
            let (outcome, egg) = run(tray, matching_pose(tray), &tuning);
            assert_eq!(outcome, EggStep::Caught, "{tray:?}");
            assert!(egg.pos.y <= tuning.floor_y);
        }
    }

    #[test]
    fn test_other_level_pose_misses() {
        let tuning = Tuning::default();
        let cases = [
            (Tray::LeftUpper, WolfPose::RightTop, Side::Left),
            (Tray::LeftLower, WolfPose::LeftTop, Side::Left),
            (Tray::RightUpper, WolfPose::RightBottom, Side::Right),
            (Tray::RightLower, WolfPose::RightTop, Side::Right),
        ];
        for (tray, pose, side) in cases {
            let (outcome, _) = run(tray, pose, &tuning);
            assert_eq!(outcome, EggStep::Missed { side }, "{tray:?} vs {pose:?}");
        }
    }

    #[test]
    fn test_catch_removes_before_moving() {
        let tuning = Tuning::default();
        let mut egg = Egg::launch(1, Tray::RightLower, &tuning);
        let inside = egg.hitbox().center();
        let before = egg.pos;
        assert_eq!(egg.step(inside, &tuning), EggStep::Caught);
        assert_eq!(egg.pos, before);
    }

    proptest! {
        #[test]
        fn prop_y_strictly_increases(tray_idx in 0usize..4, px in 0.0f32..1400.0, py in 0.0f32..800.0) {
            let tuning = Tuning::default();
            let tray = Tray::ALL[tray_idx];
            let catch_point = Vec2::new(px, py);
            let mut egg = Egg::launch(1, tray, &tuning);
            for _ in 0..MAX_STEPS {
                let before = egg.pos.y;
                match egg.step(catch_point, &tuning) {
                    EggStep::Moving => prop_assert!(egg.pos.y > before),
                    EggStep::Caught => {
                        // Removed at this tick, never reached the floor
                        prop_assert!(egg.hitbox().contains_point(catch_point));
                        prop_assert!(egg.pos.y <= tuning.floor_y);
                        break;
                    }
                    EggStep::Missed { .. } => {
                        prop_assert!(egg.pos.y > before);
                        prop_assert!(egg.pos.y > tuning.floor_y);
                        break;
                    }
                }
            }
        }
    }
}
