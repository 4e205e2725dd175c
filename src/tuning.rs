//! Data-driven game balance
//!
//! Both game variants share one simulation; everything that differed between
//! them lives in a [`Tuning`] table.

use serde::{Deserialize, Serialize};

use crate::{Color, hex};

/// Which flavor of the game is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Neon palette, snappier jump
    #[default]
    Cyber,
    /// Softer palette, slightly heavier player
    Classic,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Cyber => "cyber",
            Variant::Classic => "classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cyber" => Some(Variant::Cyber),
            "classic" | "default" => Some(Variant::Classic),
            _ => None,
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            Variant::Cyber => Tuning::cyber(),
            Variant::Classic => Tuning::classic(),
        }
    }
}

/// Color theme, cycled on every restart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Player body, jump sparks
    pub primary: Color,
    /// Obstacles, pickup sparks, death burst
    pub secondary: Color,
    /// Clear color
    pub background: Color,
}

/// Per-variant constants (per-frame units, pixels)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub variant: Variant,
    pub gravity: f32,
    /// Negative: screen y grows downward
    pub jump_force: f32,
    /// Rotation gained per unit of vertical velocity (degrees)
    pub tilt_factor: f32,
    /// Symmetric rotation clamp (degrees)
    pub max_tilt: f32,
    pub start_speed: f32,
    pub speed_ramp: f32,
    /// Frames between obstacle spawns at session start
    pub spawn_interval: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_step: f32,
    pub collectible_chance: f32,
    pub collectible_bonus: u64,
    pub obstacle_points: u64,
    /// Combo increments per multiplier step
    pub combo_step: u32,
    pub shake_decay: f32,
    pub death_shake: f32,
    /// Mouth oscillation speed while talking / idle (radians per frame)
    pub talk_cycle_speed: f32,
    pub idle_cycle_speed: f32,
    pub themes: Vec<Theme>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::cyber()
    }
}

impl Tuning {
    pub fn cyber() -> Self {
        Self {
            variant: Variant::Cyber,
            gravity: 0.85,
            jump_force: -17.0,
            tilt_factor: 0.4,
            max_tilt: 20.0,
            start_speed: 7.0,
            speed_ramp: 0.0012,
            spawn_interval: 80.0,
            spawn_interval_min: 35.0,
            spawn_interval_step: 0.18,
            collectible_chance: 0.015,
            collectible_bonus: 50,
            obstacle_points: 10,
            combo_step: 5,
            shake_decay: 0.92,
            death_shake: 2.5,
            talk_cycle_speed: 0.4,
            idle_cycle_speed: 0.06,
            themes: vec![
                Theme {
                    primary: hex(0x00f0ff),
                    secondary: hex(0xb040ff),
                    background: hex(0x0a0e17),
                },
                Theme {
                    primary: hex(0x00ffcc),
                    secondary: hex(0x7020ff),
                    background: hex(0x0c0f1a),
                },
                Theme {
                    primary: hex(0x40e0ff),
                    secondary: hex(0xff30d0),
                    background: hex(0x080b14),
                },
            ],
        }
    }

    pub fn classic() -> Self {
        Self {
            variant: Variant::Classic,
            gravity: 0.9,
            jump_force: -16.0,
            max_tilt: 25.0,
            spawn_interval: 90.0,
            spawn_interval_min: 40.0,
            talk_cycle_speed: 0.35,
            idle_cycle_speed: 0.05,
            themes: vec![
                Theme {
                    primary: hex(0xffcc33),
                    secondary: hex(0xe85d3f),
                    background: hex(0x87ceeb),
                },
                Theme {
                    primary: hex(0x7ed957),
                    secondary: hex(0x3f6fe8),
                    background: hex(0xa4d8f0),
                },
                Theme {
                    primary: hex(0xff8fb1),
                    secondary: hex(0x8e44ad),
                    background: hex(0xf5d6a0),
                },
            ],
            ..Self::cyber()
        }
    }

    /// Theme lookup; out-of-range indices wrap instead of failing
    pub fn theme(&self, index: usize) -> Theme {
        match self.themes.len() {
            0 => Theme {
                primary: hex(0xffffff),
                secondary: hex(0x808080),
                background: hex(0x000000),
            },
            n => self.themes[index % n],
        }
    }

    pub fn theme_count(&self) -> usize {
        self.themes.len().max(1)
    }
}
