//! Draw list construction
//!
//! [`build`] is a read-only pass over the [`World`]. Layers are emitted back
//! to front, so later vertices paint over earlier ones.

use std::f32::consts::{FRAC_PI_4, PI};

use glam::Vec2;

use super::font;
use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::GROUND_STRIP;
use crate::sim::rng::RandomSource;
use crate::sim::state::{Expression, ObstacleKind, Player, World};
use crate::{Color, GameError, with_alpha};

/// Pixel size of one bitmap font cell
const TEXT_CELL: f32 = 3.0;
const PARTICLE_SEGMENTS: u32 = 6;
const COLLECTIBLE_CORE: f32 = 3.0;
/// Keeps the sheen's corners inside the body's 8px rounding
const SHEEN_INSET: f32 = 2.5;

/// One frame worth of geometry
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub clear: Color,
    pub vertices: Vec<Vertex>,
}

/// Quality knobs that change what gets drawn
#[derive(Debug, Clone, Copy)]
pub struct SceneOptions {
    pub trail: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self { trail: true }
    }
}

/// Anything that can show a [`Scene`]
pub trait Surface {
    fn present(&mut self, scene: &Scene) -> Result<(), GameError>;
    fn resize(&mut self, width: u32, height: u32);
}

/// Random camera offset for the current shake amplitude
pub fn shake_offset(shake: f32, rng: &mut dyn RandomSource) -> Vec2 {
    if shake <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        shake * (rng.next_f32() - 0.5) * 8.0,
        shake * (rng.next_f32() - 0.5) * 8.0,
    )
}

/// Build the full scene, shifted by `shake`
pub fn build(world: &World, shake: Vec2, options: &SceneOptions) -> Scene {
    let theme = world.theme();
    let mut v = Vec::with_capacity(8192);

    draw_sky(world, &mut v);
    draw_clouds(world, &mut v);
    draw_sun(world, &mut v);
    draw_ground(world, &mut v);
    draw_grass(world, &mut v);

    for c in &world.collectibles {
        let center = c.pos + c.size / 2.0;
        let mut disc = shapes::circle(center, c.size.x / 2.0, c.color, 16);
        shapes::rotate_about(&mut disc, center, c.rotation);
        v.extend(disc);
        v.extend(shapes::circle(center, COLLECTIBLE_CORE, colors::WHITE, 10));
    }

    for o in &world.obstacles {
        match o.kind {
            ObstacleKind::Spike => {
                v.extend(shapes::triangle(
                    Vec2::new(o.pos.x, o.pos.y + o.size.y),
                    Vec2::new(o.pos.x + o.size.x / 2.0, o.pos.y),
                    o.pos + o.size,
                    o.color,
                ));
            }
            ObstacleKind::Platform => {
                v.extend(shapes::rect(o.pos, o.size, o.color));
                v.extend(shapes::rect_outline(
                    o.pos,
                    o.size,
                    2.0,
                    with_alpha(colors::WHITE, 0.8),
                ));
            }
        }
    }

    if options.trail {
        let len = world.player.trail.len().max(1) as f32;
        for (i, p) in world.player.trail.iter().enumerate() {
            let alpha = (1.0 - i as f32 / len) * 0.3;
            let scale = 1.0 - i as f32 * 0.04;
            let size = world.player.size * scale;
            let min = *p + (world.player.size - size) / 2.0;
            v.extend(shapes::rounded_rect(
                min,
                size,
                6.0 * scale,
                with_alpha(theme.primary, alpha),
            ));
        }
    }

    v.extend(player(&world.player, theme.primary));

    for p in &world.particles {
        v.extend(shapes::circle(
            p.pos,
            p.size,
            with_alpha(p.color, p.life),
            PARTICLE_SEGMENTS,
        ));
    }

    for e in &world.effects {
        v.extend(font::text(
            &e.text,
            e.pos,
            TEXT_CELL,
            with_alpha(e.color, e.life),
        ));
    }

    shapes::translate(&mut v, shake);

    Scene {
        clear: theme.background,
        vertices: v,
    }
}

fn draw_sky(world: &World, v: &mut Vec<Vertex>) {
    let w = world.viewport.x;
    v.extend(shapes::rect(Vec2::ZERO, world.viewport, world.theme().background));
    v.extend(shapes::vertical_gradient(
        Vec2::ZERO,
        Vec2::new(w, world.ground.y),
        colors::SKY_TINT,
        colors::TRANSPARENT,
    ));
}

fn draw_clouds(world: &World, v: &mut Vec<Vertex>) {
    for cloud in &world.clouds {
        let color = with_alpha(colors::CLOUD, cloud.opacity);
        let half = cloud.size / 2.0;
        let center = cloud.pos + half;
        v.extend(shapes::ellipse(center, half, color, 16));
        v.extend(shapes::ellipse(
            center + Vec2::new(-half.x * 0.5, half.y * 0.2),
            half * 0.6,
            color,
            12,
        ));
    }
}

fn draw_sun(world: &World, v: &mut Vec<Vertex>) {
    let sun = &world.sun;
    v.extend(shapes::circle(sun.pos, sun.radius + 10.0, with_alpha(colors::MOON, 0.15), 24));
    v.extend(shapes::circle(sun.pos, sun.radius, colors::MOON, 32));
    v.extend(shapes::ring(
        sun.pos,
        sun.radius + 5.0,
        sun.radius + 7.0,
        with_alpha(colors::MOON_RING, 0.5),
        32,
    ));

    for i in 0..8 {
        let angle = sun.wave_offset * 2.0 + i as f32 * FRAC_PI_4;
        let at = sun.pos + Vec2::from_angle(angle) * (sun.radius + 16.0);
        let color = if i % 2 == 0 { colors::MOON_RING } else { colors::LED_ALT };
        v.extend(shapes::circle(at, 2.5, color, 8));
    }
}

fn draw_ground(world: &World, v: &mut Vec<Vertex>) {
    let w = world.viewport.x;
    let ground = world.ground;
    v.extend(shapes::rect(
        Vec2::new(0.0, ground.y),
        Vec2::new(w, ground.height),
        colors::GROUND,
    ));
    v.extend(shapes::rect(
        Vec2::new(0.0, ground.y - GROUND_STRIP),
        Vec2::new(w, GROUND_STRIP),
        colors::GROUND_STRIP,
    ));
    v.extend(shapes::line(
        Vec2::new(0.0, ground.y),
        Vec2::new(w, ground.y),
        2.0,
        with_alpha(world.theme().primary, 0.6),
    ));

    for detail in &world.ground_details {
        v.extend(shapes::rect(detail.pos, Vec2::new(detail.width, 2.0), colors::GROUND_DETAIL));
        v.extend(shapes::rect(
            detail.pos + Vec2::new(detail.width, -3.0),
            Vec2::new(2.0, 8.0),
            colors::GROUND_DETAIL,
        ));
    }
}

fn draw_grass(world: &World, v: &mut Vec<Vertex>) {
    let base = world.ground.y - GROUND_STRIP;
    for blade in &world.grass {
        if blade.current_height <= 0.0 {
            continue;
        }
        let sway = blade.wave_offset.sin() * 3.0;
        let root = Vec2::new(blade.x, base);
        let tip = Vec2::new(blade.x + sway, base - blade.current_height);
        v.extend(shapes::line(root, tip, 1.5, with_alpha(colors::GRASS, 0.6)));
        v.extend(shapes::rect(tip - Vec2::splat(1.0), Vec2::splat(2.0), colors::GRASS_TIP));
    }
}

/// Body, face and outline, rotated about the player center
fn player(player: &Player, body: Color) -> Vec<Vertex> {
    let p = player.pos;
    let s = player.size;
    let mut v = Vec::with_capacity(1024);

    v.extend(shapes::rounded_rect(p, s, 8.0, body));
    v.extend(shapes::diagonal_gradient(
        p + Vec2::splat(SHEEN_INSET),
        s - Vec2::splat(2.0 * SHEEN_INSET),
        colors::BODY_SHEEN,
        colors::TRANSPARENT,
    ));
    v.extend(shapes::rect_outline(p, s, 2.0, colors::BODY_OUTLINE));

    // Eyes
    let eye_radius = match player.expression {
        Expression::Surprised => 8.0,
        _ => 6.0,
    };
    let pupil_shift = match player.expression {
        Expression::Sad => Vec2::new(0.0, 2.0),
        _ => Vec2::new(1.0, 0.0),
    };
    for eye in [p + Vec2::new(s.x * 0.3, s.y * 0.38), p + Vec2::new(s.x * 0.7, s.y * 0.38)] {
        v.extend(shapes::circle(eye, eye_radius, colors::WHITE, 14));
        v.extend(shapes::circle(eye + pupil_shift, eye_radius * 0.5, colors::BLACK, 10));
    }

    // Mouth
    let mouth = p + Vec2::new(s.x / 2.0, s.y * 0.72);
    let open = player.mouth_openness;
    match player.expression {
        Expression::Normal => {
            v.extend(shapes::ellipse(mouth, Vec2::new(7.0, 1.5 + open * 5.0), colors::BLACK, 12));
        }
        Expression::Smiling => {
            v.extend(shapes::arc_stroke(
                mouth - Vec2::new(0.0, 3.0),
                Vec2::splat(8.0),
                0.0,
                PI,
                3.0,
                colors::BLACK,
                12,
            ));
            if player.is_talking {
                v.extend(shapes::ellipse(
                    mouth + Vec2::new(0.0, 2.0),
                    Vec2::new(4.0, 1.0 + open * 3.0),
                    colors::TONGUE,
                    10,
                ));
            }
        }
        Expression::Surprised => {
            v.extend(shapes::circle(mouth, 3.0 + open * 3.0, colors::BLACK, 12));
        }
        Expression::Sad => {
            v.extend(shapes::arc_stroke(
                mouth + Vec2::new(0.0, 6.0),
                Vec2::splat(8.0),
                PI,
                2.0 * PI,
                3.0,
                colors::BLACK,
                12,
            ));
        }
    }

    shapes::rotate_about(&mut v, player.center(), player.rotation.to_radians());
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex;
    use crate::sim::factory;
    use crate::sim::rng::SequenceRng;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;

    fn world() -> World {
        let mut rng = SequenceRng::constant(0.5);
        World::new(Tuning::cyber(), 0, Vec2::new(800.0, 700.0), &mut rng)
    }

    #[test]
    fn test_clear_is_theme_background() {
        let world = world();
        let scene = build(&world, Vec2::ZERO, &SceneOptions::default());
        assert_eq!(scene.clear, world.theme().background);
        assert!(!scene.vertices.is_empty());
        assert_eq!(scene.vertices.len() % 3, 0);
    }

    #[test]
    fn test_shake_translates_every_vertex() {
        let world = world();
        let still = build(&world, Vec2::ZERO, &SceneOptions::default());
        let shaken = build(&world, Vec2::new(5.0, -2.0), &SceneOptions::default());
        assert_eq!(still.vertices.len(), shaken.vertices.len());
        for (a, b) in still.vertices.iter().zip(&shaken.vertices) {
            assert!((b.position[0] - a.position[0] - 5.0).abs() < 1e-3);
            assert!((b.position[1] - a.position[1] + 2.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_shake_offset_centered() {
        let mut rng = SequenceRng::constant(0.5);
        assert_eq!(shake_offset(2.5, &mut rng), Vec2::ZERO);
        assert_eq!(shake_offset(0.0, &mut rng), Vec2::ZERO);

        let mut rng = SequenceRng::new(vec![0.0, 0.75]);
        let offset = shake_offset(2.0, &mut rng);
        assert_eq!(offset, Vec2::new(-8.0, 4.0));
    }

    #[test]
    fn test_trail_toggle() {
        let mut world = world();
        for _ in 0..5 {
            world.player.record_trail();
        }
        let with = build(&world, Vec2::ZERO, &SceneOptions { trail: true });
        let without = build(&world, Vec2::ZERO, &SceneOptions { trail: false });
        assert!(with.vertices.len() > without.vertices.len());
    }

    #[test]
    fn test_entities_add_geometry() {
        let mut world = world();
        let base = build(&world, Vec2::ZERO, &SceneOptions::default()).vertices.len();

        let size = ObstacleKind::Spike.size();
        world.obstacles.push(Obstacle {
            pos: Vec2::new(400.0, world.ground.y - size.y),
            size,
            kind: ObstacleKind::Spike,
            color: hex(0xb040ff),
        });
        let spiked = build(&world, Vec2::ZERO, &SceneOptions::default()).vertices.len();
        assert_eq!(spiked, base + 3);

        world.collectibles.push(factory::collectible(800.0, world.ground.y));
        let more = build(&world, Vec2::ZERO, &SceneOptions::default()).vertices.len();
        assert!(more > spiked);
    }

    #[test]
    fn test_collectible_is_a_disc_with_core() {
        let mut world = world();
        world.collectibles.push(factory::collectible(400.0, world.ground.y));
        let c = &world.collectibles[0];
        let center = c.pos + c.size / 2.0;
        let radius = c.size.x / 2.0;

        let scene = build(&world, Vec2::ZERO, &SceneOptions { trail: false });
        let disc: Vec<_> = scene
            .vertices
            .iter()
            .filter(|v| v.color == c.color)
            .collect();
        assert_eq!(disc.len(), 16 * 3);
        for v in disc {
            let d = v.pos().distance(center);
            assert!(d < 1e-3 || (d - radius).abs() < 1e-3);
        }
    }

    #[test]
    fn test_grass_grows_from_ground_strip() {
        let mut world = world();
        for blade in &mut world.grass {
            blade.current_height = blade.base_height;
        }
        assert!(!world.grass.is_empty());
        let strip_top = world.ground.y - GROUND_STRIP;

        let mut ground = Vec::new();
        draw_ground(&world, &mut ground);
        assert!(
            ground
                .iter()
                .any(|v| v.position == [0.0, strip_top] && v.color == colors::GROUND_STRIP)
        );

        let mut grass = Vec::new();
        draw_grass(&world, &mut grass);
        assert!(grass.iter().all(|v| v.position[1] <= strip_top + 1.0));
        assert!(grass.iter().all(|v| v.position[1] < world.ground.y));
    }

    #[test]
    fn test_particle_alpha_follows_life() {
        let mut world = world();
        let mut rng = SequenceRng::constant(0.5);
        world.burst(Vec2::new(10.0, 10.0), 1, hex(0xffffff), &mut rng);
        world.particles[0].life = 0.5;
        let scene = build(&world, Vec2::ZERO, &SceneOptions { trail: false });
        let last = scene.vertices.last().unwrap();
        assert_eq!(last.color[3], 0.5);
    }

    #[test]
    fn test_player_rotation_moves_body() {
        let mut world = world();
        let flat = player(&world.player, hex(0x00f0ff));
        world.player.rotation = 20.0;
        let tilted = player(&world.player, hex(0x00f0ff));
        assert_eq!(flat.len(), tilted.len());
        assert!(flat.iter().zip(&tilted).any(|(a, b)| a.position != b.position));
    }
}
