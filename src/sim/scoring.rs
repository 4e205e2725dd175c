//! Score, combo/multiplier and the difficulty ramp

use crate::tuning::Tuning;

/// Score keeping for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoring {
    pub score: u64,
    /// Obstacles passed this session; never resets mid-session
    pub combo: u32,
    pub multiplier: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            multiplier: 1,
        }
    }
}

impl Scoring {
    /// Credit a passed obstacle. Returns the new multiplier when this pass
    /// completed a combo step.
    pub fn obstacle_passed(&mut self, tuning: &Tuning) -> Option<u32> {
        self.score += tuning.obstacle_points * self.multiplier as u64;
        self.combo += 1;

        let step = tuning.combo_step.max(1);
        if self.combo % step == 0 {
            self.multiplier += 1;
            Some(self.multiplier)
        } else {
            None
        }
    }

    /// Flat pickup bonus, not scaled by the multiplier
    pub fn collected(&mut self, tuning: &Tuning) {
        self.score += tuning.collectible_bonus;
    }
}

/// Spawn pacing and scroll speed
#[derive(Debug, Clone, PartialEq)]
pub struct Difficulty {
    /// Horizontal scroll per frame, grows without bound
    pub speed: f32,
    pub spawn_timer: f32,
    /// Frames between obstacles, shrinks to a floor
    pub spawn_interval: f32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.start_speed,
            spawn_timer: 0.0,
            spawn_interval: tuning.spawn_interval,
        }
    }

    /// Advance the spawn timer. Returns true when an obstacle is due, in
    /// which case the timer resets and the interval tightens.
    pub fn tick_spawn(&mut self, tuning: &Tuning) -> bool {
        self.spawn_timer += 1.0;
        if self.spawn_timer > self.spawn_interval {
            self.spawn_timer = 0.0;
            self.spawn_interval =
                (self.spawn_interval - tuning.spawn_interval_step).max(tuning.spawn_interval_min);
            true
        } else {
            false
        }
    }

    pub fn ramp_speed(&mut self, tuning: &Tuning) {
        self.speed += tuning.speed_ramp;
    }
}
