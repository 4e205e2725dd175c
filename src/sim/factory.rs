//! Entity factories
//!
//! All randomness flows through [`RandomSource`] so tests can pin it.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{
    Cloud, Collectible, GrassBlade, GroundDetail, Obstacle, ObstacleKind, Particle,
};
use crate::consts::*;
use crate::{Color, hex};

/// Grass blade spacing (pixels)
const GRASS_SPACING: f32 = 6.0;
/// Ground detail spacing (pixels)
const DETAIL_SPACING: f32 = 80.0;

pub const COLLECTIBLE_COLOR: Color = hex(0x00ffcc);

/// New obstacle resting on the ground at the right viewport edge
pub fn obstacle(
    viewport_width: f32,
    ground_y: f32,
    color: Color,
    rng: &mut dyn RandomSource,
) -> Obstacle {
    let kind = ObstacleKind::ALL[rng.index(ObstacleKind::ALL.len())];
    let size = kind.size();
    Obstacle {
        pos: Vec2::new(viewport_width, ground_y - size.y),
        size,
        kind,
        color,
    }
}

/// New pickup floating above the ground at the right viewport edge
pub fn collectible(viewport_width: f32, ground_y: f32) -> Collectible {
    Collectible {
        pos: Vec2::new(viewport_width, ground_y - COLLECTIBLE_LIFT),
        size: Vec2::splat(COLLECTIBLE_SIZE),
        rotation: 0.0,
        color: COLLECTIBLE_COLOR,
    }
}

/// One spark flying in a random direction
pub fn particle(at: Vec2, color: Color, rng: &mut dyn RandomSource) -> Particle {
    Particle {
        pos: at,
        size: rng.range(1.5, 4.5),
        vel: Vec2::new(rng.range(-3.0, 3.0), rng.range(-3.0, 3.0)),
        color,
        life: 1.0,
        decay: rng.range(0.015, 0.04),
    }
}

pub fn clouds(viewport_width: f32, rng: &mut dyn RandomSource) -> Vec<Cloud> {
    let count = (viewport_width / 200.0).floor().max(0.0) as usize + 4;
    (0..count)
        .map(|_| Cloud {
            pos: Vec2::new(rng.range(0.0, viewport_width * 1.8), rng.range(40.0, 160.0)),
            size: Vec2::new(rng.range(50.0, 150.0), rng.range(20.0, 50.0)),
            speed: rng.range(0.1, 0.5),
            opacity: rng.range(0.2, 0.5),
        })
        .collect()
}

pub fn grass(viewport_width: f32, rng: &mut dyn RandomSource) -> Vec<GrassBlade> {
    let count = (viewport_width / GRASS_SPACING).floor().max(0.0) as usize;
    (0..count)
        .map(|i| GrassBlade {
            x: i as f32 * GRASS_SPACING + rng.range(0.0, 3.0),
            base_height: rng.range(8.0, 20.0),
            current_height: 0.0,
            wave_offset: rng.range(0.0, std::f32::consts::TAU),
            sway_speed: rng.range(0.01, 0.03),
            move_speed: rng.range(0.2, 0.6),
        })
        .collect()
}

pub fn ground_details(
    viewport_width: f32,
    ground_y: f32,
    rng: &mut dyn RandomSource,
) -> Vec<GroundDetail> {
    let count = (viewport_width / DETAIL_SPACING).ceil().max(0.0) as usize + 1;
    (0..count)
        .map(|i| GroundDetail {
            pos: Vec2::new(
                i as f32 * DETAIL_SPACING + rng.range(0.0, 30.0),
                ground_y + rng.range(20.0, GROUND_HEIGHT - 15.0),
            ),
            width: rng.range(12.0, 40.0),
        })
        .collect()
}
