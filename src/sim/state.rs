//! World state and entity types
//!
//! Everything one session owns lives in [`World`]. Screen coordinates:
//! origin top-left, y grows downward, units are pixels and frames.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::factory;
use super::rng::RandomSource;
use super::scoring::{Difficulty, Scoring};
use crate::consts::*;
use crate::tuning::{Theme, Tuning};
use crate::Color;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    #[default]
    Menu,
    /// Frames are advancing
    Playing,
    /// Session ended on a collision
    GameOver,
}

/// Facial expression drawn on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Expression {
    #[default]
    Normal,
    Smiling,
    Surprised,
    Sad,
}

/// The runner
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    pub is_jumping: bool,
    /// Degrees, positive tilts nose-down
    pub rotation: f32,
    pub expression: Expression,
    /// Frames until the expression falls back to `Normal`
    pub expression_timer: u32,
    pub is_talking: bool,
    pub talk_timer: u32,
    /// Phase of the mouth oscillation, kept in `[0, π)`
    pub mouth_cycle: f32,
    /// 0 = closed, 1 = wide open
    pub mouth_openness: f32,
    /// Recent positions (newest first)
    pub trail: VecDeque<Vec2>,
}

impl Player {
    /// A player standing on the ground line
    pub fn new(ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, ground_y - PLAYER_SIZE),
            size: Vec2::splat(PLAYER_SIZE),
            velocity_y: 0.0,
            is_jumping: false,
            rotation: 0.0,
            expression: Expression::Normal,
            expression_timer: 0,
            is_talking: false,
            talk_timer: 0,
            mouth_cycle: 0.0,
            mouth_openness: 0.0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Gravity, integration, tilt and ground clamp for one frame.
    ///
    /// Velocity is updated before position.
    pub fn integrate(&mut self, tuning: &Tuning, ground_y: f32) {
        self.velocity_y += tuning.gravity;
        self.pos.y += self.velocity_y;
        self.rotation = (self.rotation + self.velocity_y * tuning.tilt_factor)
            .clamp(-tuning.max_tilt, tuning.max_tilt);

        if self.bottom() > ground_y {
            self.land(ground_y);
        }
    }

    /// Snap onto the ground line; the only landing transition
    pub fn land(&mut self, ground_y: f32) {
        self.pos.y = ground_y - self.size.y;
        self.velocity_y = 0.0;
        self.is_jumping = false;
        self.rotation = 0.0;
    }

    /// Apply the jump impulse. Returns false (and changes nothing) while airborne.
    pub fn try_jump(&mut self, tuning: &Tuning) -> bool {
        if self.is_jumping {
            return false;
        }
        self.velocity_y = tuning.jump_force;
        self.is_jumping = true;
        self.rotation = -tuning.max_tilt;
        self.set_expression(Expression::Surprised, 12);
        true
    }

    pub fn set_expression(&mut self, expression: Expression, frames: u32) {
        self.expression = expression;
        self.expression_timer = frames;
    }

    pub fn start_talking(&mut self, frames: u32) {
        self.is_talking = true;
        self.talk_timer = frames;
    }

    /// Count down expression/talk timers and advance the mouth oscillation
    pub fn animate_face(&mut self, tuning: &Tuning) {
        if self.expression_timer > 0 {
            self.expression_timer -= 1;
        } else if self.expression != Expression::Normal {
            self.expression = Expression::Normal;
        }

        if self.talk_timer > 0 {
            self.talk_timer -= 1;
        } else {
            self.is_talking = false;
        }

        use std::f32::consts::PI;
        if self.is_talking {
            self.mouth_cycle = (self.mouth_cycle + tuning.talk_cycle_speed) % PI;
            self.mouth_openness = self.mouth_cycle.sin() * 0.6 + 0.4;
        } else {
            self.mouth_cycle = (self.mouth_cycle + tuning.idle_cycle_speed) % PI;
            self.mouth_openness = self.mouth_cycle.sin() * 0.2 + 0.2;
        }
    }

    /// Push the current position into the bounded trail
    pub fn record_trail(&mut self) {
        self.trail.push_front(self.pos);
        self.trail.truncate(TRAIL_LENGTH);
    }
}

/// Obstacle shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Tall narrow triangle
    Spike,
    /// Low wide block
    Platform,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::Spike, ObstacleKind::Platform];

    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Spike => Vec2::new(30.0, 55.0),
            ObstacleKind::Platform => Vec2::new(70.0, 35.0),
        }
    }
}

/// Ground hazard; touching one ends the session
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    pub color: Color,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Right edge has crossed the left viewport edge
    pub fn is_passed(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Floating bonus pickup
#[derive(Debug, Clone)]
pub struct Collectible {
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians
    pub rotation: f32,
    pub color: Color,
}

impl Collectible {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// A spark for visual feedback
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    /// 0-1, decreases by `decay` every frame
    pub life: f32,
    pub decay: f32,
}

/// Floating score/combo text
#[derive(Debug, Clone)]
pub struct TextEffect {
    pub text: String,
    pub pos: Vec2,
    pub color: Color,
    pub life: f32,
}

/// Background cloud (drifts, wraps)
#[derive(Debug, Clone)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub opacity: f32,
}

/// Single blade of grass along the ground strip
#[derive(Debug, Clone)]
pub struct GrassBlade {
    pub x: f32,
    pub base_height: f32,
    pub current_height: f32,
    pub wave_offset: f32,
    pub sway_speed: f32,
    pub move_speed: f32,
}

/// Circuit mark on the ground band, scrolls with the foreground
#[derive(Debug, Clone)]
pub struct GroundDetail {
    pub pos: Vec2,
    pub width: f32,
}

/// Ambient light source in the top-right corner
#[derive(Debug, Clone)]
pub struct Sun {
    pub pos: Vec2,
    pub radius: f32,
    pub base_y: f32,
    pub wave_offset: f32,
    pub speed: f32,
}

impl Sun {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            pos: Vec2::new(viewport_width - 70.0, 70.0),
            radius: 30.0,
            base_y: 70.0,
            wave_offset: 0.0,
            speed: 0.025,
        }
    }

    pub fn bob(&mut self) {
        self.wave_offset += self.speed;
        self.pos.y = self.base_y + self.wave_offset.sin() * 12.0;
    }
}

/// Ground band geometry
#[derive(Debug, Clone, Copy)]
pub struct Ground {
    /// Top edge of the band; the player's feet rest here
    pub y: f32,
    pub height: f32,
}

impl Ground {
    pub fn for_viewport(viewport: Vec2) -> Self {
        Self {
            y: viewport.y - GROUND_HEIGHT,
            height: GROUND_HEIGHT,
        }
    }
}

/// Something the host should hear about, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    ObstaclePassed,
    MultiplierUp(u32),
    Collected,
    Crashed,
    ScoreChanged(u64),
}

/// Complete per-session state
#[derive(Debug, Clone)]
pub struct World {
    pub phase: GamePhase,
    pub tuning: Tuning,
    pub theme_index: usize,
    pub viewport: Vec2,
    pub ground: Ground,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub particles: Vec<Particle>,
    pub effects: Vec<TextEffect>,
    pub clouds: Vec<Cloud>,
    pub grass: Vec<GrassBlade>,
    pub ground_details: Vec<GroundDetail>,
    pub sun: Sun,
    pub scoring: Scoring,
    pub difficulty: Difficulty,
    /// Camera shake amplitude, decays geometrically
    pub screen_shake: f32,
    /// Live particle cap
    pub max_particles: usize,
    pub frame: u64,
    /// Pending notifications for the host
    pub events: Vec<GameEvent>,
}

impl World {
    /// Fresh session in the `Menu` phase
    pub fn new(tuning: Tuning, theme_index: usize, viewport: Vec2, rng: &mut dyn RandomSource) -> Self {
        let ground = Ground::for_viewport(viewport);
        let difficulty = Difficulty::new(&tuning);
        let theme_index = theme_index % tuning.theme_count();
        Self {
            phase: GamePhase::Menu,
            theme_index,
            viewport,
            ground,
            player: Player::new(ground.y),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            effects: Vec::new(),
            clouds: factory::clouds(viewport.x, rng),
            grass: factory::grass(viewport.x, rng),
            ground_details: factory::ground_details(viewport.x, ground.y, rng),
            sun: Sun::new(viewport.x),
            scoring: Scoring::default(),
            difficulty,
            screen_shake: 0.0,
            max_particles: usize::MAX,
            frame: 0,
            events: Vec::new(),
            tuning,
        }
    }

    pub fn theme(&self) -> Theme {
        self.tuning.theme(self.theme_index)
    }

    /// Recompute ground and decorations for a new viewport size.
    ///
    /// Gameplay entities keep their positions.
    pub fn resize(&mut self, viewport: Vec2, rng: &mut dyn RandomSource) {
        let was_grounded = !self.player.is_jumping;
        self.viewport = viewport;
        self.ground = Ground::for_viewport(viewport);
        self.sun.pos.x = viewport.x - 70.0;
        self.clouds = factory::clouds(viewport.x, rng);
        self.grass = factory::grass(viewport.x, rng);
        self.ground_details = factory::ground_details(viewport.x, self.ground.y, rng);
        if was_grounded && self.phase != GamePhase::Playing {
            self.player.land(self.ground.y);
        }
    }

    /// Spawn a burst of particles, respecting the live cap
    pub fn burst(&mut self, at: Vec2, count: usize, color: Color, rng: &mut dyn RandomSource) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            self.particles.push(factory::particle(at, color, rng));
        }
    }

    pub fn float_text(&mut self, text: impl Into<String>, at: Vec2, color: Color) {
        self.effects.push(TextEffect {
            text: text.into(),
            pos: at,
            color,
            life: 1.0,
        });
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
