//! Difficulty controller
//!
//! Maps cumulative score to a tier (background, spawn interval, pacing) and
//! fires the late-game overrides once the tier list is exhausted. The
//! controller only ever moves forward.

use serde::{Deserialize, Serialize};

/// A difficulty level keyed to a score threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Score at which this tier begins
    pub threshold: u32,
    /// Milliseconds between egg spawns
    pub spawn_interval_ms: u32,
    /// Frames per second added to the base frame rate
    pub pacing_offset: u32,
    /// Background art handle
    pub background: String,
}

impl Tier {
    pub fn new(threshold: u32, spawn_interval_ms: u32, pacing_offset: u32, background: &str) -> Self {
        Self {
            threshold,
            spawn_interval_ms,
            pacing_offset,
            background: background.to_string(),
        }
    }
}

/// A late-game adjustment outside the tier list (keeps the current background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateOverride {
    pub threshold: u32,
    pub spawn_interval_ms: u32,
    pub pacing_offset: u32,
}

impl LateOverride {
    pub fn new(threshold: u32, spawn_interval_ms: u32, pacing_offset: u32) -> Self {
        Self {
            threshold,
            spawn_interval_ms,
            pacing_offset,
        }
    }
}

/// What changed during an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyChange {
    /// Moved to the tier with this index
    TierAdvanced { tier: usize },
    /// The override at this threshold took effect
    OverrideFired { threshold: u32 },
}

/// Forward-only difficulty state machine
#[derive(Debug, Clone)]
pub struct DifficultyController {
    tiers: Vec<Tier>,
    overrides: Vec<LateOverride>,
    tier: usize,
    overrides_fired: usize,
    spawn_interval_ms: u32,
    pacing_offset: u32,
}

impl DifficultyController {
    /// Build a controller from a validated tier table (see `Tuning::validate`).
    /// Returns `None` if there are no tiers.
    pub fn new(tiers: Vec<Tier>, overrides: Vec<LateOverride>) -> Option<Self> {
        let first = tiers.first()?;
        let spawn_interval_ms = first.spawn_interval_ms;
        let pacing_offset = first.pacing_offset;
        Some(Self {
            tiers,
            overrides,
            tier: 0,
            overrides_fired: 0,
            spawn_interval_ms,
            pacing_offset,
        })
    }

    /// Evaluate the current score. At most one step is taken per call.
    pub fn evaluate(&mut self, score: u32) -> Option<DifficultyChange> {
        if let Some(next) = self.tiers.get(self.tier + 1) {
            if score < next.threshold {
                return None;
            }
            self.spawn_interval_ms = next.spawn_interval_ms;
            self.pacing_offset = next.pacing_offset;
            self.tier += 1;
            log::info!(
                "Difficulty tier {} at score {} (interval {} ms, pacing +{})",
                self.tier,
                score,
                self.spawn_interval_ms,
                self.pacing_offset
            );
            return Some(DifficultyChange::TierAdvanced { tier: self.tier });
        }

        let pending = self.overrides.get(self.overrides_fired)?;
        if score < pending.threshold {
            return None;
        }
        self.spawn_interval_ms = pending.spawn_interval_ms;
        self.pacing_offset = pending.pacing_offset;
        self.overrides_fired += 1;
        log::info!(
            "Late-game override at score {} (interval {} ms, pacing +{})",
            pending.threshold,
            self.spawn_interval_ms,
            self.pacing_offset
        );
        Some(DifficultyChange::OverrideFired {
            threshold: pending.threshold,
        })
    }

    /// Index of the current tier
    pub fn tier_index(&self) -> usize {
        self.tier
    }

    /// True once the last tier is reached
    pub fn is_terminal(&self) -> bool {
        self.tier + 1 >= self.tiers.len()
    }

    pub fn current_tier(&self) -> &Tier {
        &self.tiers[self.tier]
    }

    pub fn background(&self) -> &str {
        &self.current_tier().background
    }

    pub fn spawn_interval_ms(&self) -> u32 {
        self.spawn_interval_ms
    }

    pub fn pacing_offset(&self) -> u32 {
        self.pacing_offset
    }

    /// Frame rate the main loop should run at
    pub fn target_fps(&self, base_fps: u32) -> u32 {
        base_fps + self.pacing_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn controller() -> DifficultyController {
        let tuning = Tuning::default();
        DifficultyController::new(tuning.tiers, tuning.late_overrides).unwrap()
    }

    #[test]
    fn test_empty_table_has_no_controller() {
        assert!(DifficultyController::new(Vec::new(), Vec::new()).is_none());
    }

    #[test]
    fn test_interval_steps_down_at_thresholds() {
        let mut diff = controller();
        assert_eq!(diff.spawn_interval_ms(), 2200);

        for score in 0..50 {
            assert_eq!(diff.evaluate(score), None);
        }
        assert_eq!(diff.spawn_interval_ms(), 2200);

        assert_eq!(diff.evaluate(50), Some(DifficultyChange::TierAdvanced { tier: 1 }));
        let after_first = diff.spawn_interval_ms();
        assert!(after_first < 2200);
        assert_eq!(diff.background(), "level_2");

        for score in 51..100 {
            assert_eq!(diff.evaluate(score), None);
            assert_eq!(diff.spawn_interval_ms(), after_first);
        }

        assert_eq!(diff.evaluate(100), Some(DifficultyChange::TierAdvanced { tier: 2 }));
        assert!(diff.spawn_interval_ms() < after_first);
        assert!(diff.is_terminal());
    }

    #[test]
    fn test_overrides_fire_once_and_stick() {
        let mut diff = controller();
        diff.evaluate(50);
        diff.evaluate(100);

        assert_eq!(diff.evaluate(199), None);
        assert_eq!(
            diff.evaluate(200),
            Some(DifficultyChange::OverrideFired { threshold: 200 })
        );
        assert_eq!(diff.spawn_interval_ms(), 600);
        assert_eq!(diff.target_fps(50), 80);

        // Score moving on does not undo the override
        assert_eq!(diff.evaluate(201), None);
        assert_eq!(diff.spawn_interval_ms(), 600);

        diff.evaluate(250);
        assert_eq!(diff.spawn_interval_ms(), 200);
        assert_eq!(diff.pacing_offset(), 60);
        assert_eq!(diff.evaluate(1000), None);
        assert_eq!(diff.background(), "level_3");
    }

    #[test]
    fn test_one_step_per_evaluation() {
        let mut diff = controller();
        // A score far past several thresholds walks forward one step at a time
        assert_eq!(diff.evaluate(300), Some(DifficultyChange::TierAdvanced { tier: 1 }));
        assert_eq!(diff.evaluate(300), Some(DifficultyChange::TierAdvanced { tier: 2 }));
        assert_eq!(
            diff.evaluate(300),
            Some(DifficultyChange::OverrideFired { threshold: 200 })
        );
        assert_eq!(
            diff.evaluate(300),
            Some(DifficultyChange::OverrideFired { threshold: 250 })
        );
        assert_eq!(diff.evaluate(300), None);
    }

    proptest! {
        #[test]
        fn prop_tier_never_regresses(steps in proptest::collection::vec(0u32..4, 1..400)) {
            let mut diff = controller();
            let mut score = 0u32;
            let mut last_tier = diff.tier_index();
            let mut last_interval = diff.spawn_interval_ms();
            for step in steps {
                score += step;
                diff.evaluate(score);
                prop_assert!(diff.tier_index() >= last_tier);
                prop_assert!(diff.spawn_interval_ms() <= last_interval);
                last_tier = diff.tier_index();
                last_interval = diff.spawn_interval_ms();
            }
        }
    }
}
