//! Sprite group entries
//!
//! Everything on screen is one of three kinds: an egg in flight, static decor
//! (the wolf and the chickens counting lives) or a short-lived effect (a
//! broken egg). The presentation layer only needs a position and a visual
//! handle for each, which `Placed` provides.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::egg::{Egg, Side};
use super::state::WolfPose;

/// What to draw for a sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    Egg { rotation: f32 },
    Wolf(WolfPose),
    Chicken,
    BrokenEgg,
}

/// Anything with a screen position and a visual
pub trait Placed {
    /// Top-left corner in screen pixels
    fn position(&self) -> Vec2;
    fn visual(&self) -> Visual;
}

impl Placed for Egg {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn visual(&self) -> Visual {
        Visual::Egg {
            rotation: self.rotation,
        }
    }
}

/// Static decor kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorKind {
    Wolf(WolfPose),
    /// A remaining life; slot 0 is the leftmost chicken
    Chicken { slot: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decor {
    pub id: u32,
    pub kind: DecorKind,
    pub pos: Vec2,
}

impl Placed for Decor {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn visual(&self) -> Visual {
        match self.kind {
            DecorKind::Wolf(pose) => Visual::Wolf(pose),
            DecorKind::Chicken { .. } => Visual::Chicken,
        }
    }
}

/// A broken egg left on the floor for a moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokenEgg {
    pub id: u32,
    pub side: Side,
    pub pos: Vec2,
    pub born_ms: u64,
    pub ttl_ms: u32,
}

impl BrokenEgg {
    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.born_ms) > u64::from(self.ttl_ms)
    }
}

impl Placed for BrokenEgg {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn visual(&self) -> Visual {
        Visual::BrokenEgg
    }
}

/// One entry of the sprite group, drawn in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sprite {
    Egg(Egg),
    Decor(Decor),
    Effect(BrokenEgg),
}

impl Sprite {
    pub fn id(&self) -> u32 {
        match self {
            Sprite::Egg(egg) => egg.id,
            Sprite::Decor(decor) => decor.id,
            Sprite::Effect(effect) => effect.id,
        }
    }

    pub fn as_egg(&self) -> Option<&Egg> {
        match self {
            Sprite::Egg(egg) => Some(egg),
            _ => None,
        }
    }
}

impl Placed for Sprite {
    fn position(&self) -> Vec2 {
        match self {
            Sprite::Egg(egg) => egg.position(),
            Sprite::Decor(decor) => decor.position(),
            Sprite::Effect(effect) => effect.position(),
        }
    }

    fn visual(&self) -> Visual {
        match self {
            Sprite::Egg(egg) => egg.visual(),
            Sprite::Decor(decor) => decor.visual(),
            Sprite::Effect(effect) => effect.visual(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broken_egg_expiry() {
        let effect = BrokenEgg {
            id: 1,
            side: Side::Left,
            pos: Vec2::new(450.0, 620.0),
            born_ms: 500,
            ttl_ms: 1000,
        };
        assert!(!effect.expired(500));
        assert!(!effect.expired(1500));
        assert!(effect.expired(1501));
    }

    #[test]
    fn test_sprite_delegates_to_variant() {
        let decor = Sprite::Decor(Decor {
            id: 7,
            kind: DecorKind::Wolf(WolfPose::RightBottom),
            pos: Vec2::new(450.0, 340.0),
        });
        assert_eq!(decor.id(), 7);
        assert_eq!(decor.visual(), Visual::Wolf(WolfPose::RightBottom));
        assert_eq!(decor.position(), Vec2::new(450.0, 340.0));
        assert!(decor.as_egg().is_none());
    }
}
