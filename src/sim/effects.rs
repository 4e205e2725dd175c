//! Decay-and-cull pools and ambient decoration motion

use super::rng::RandomSource;
use super::state::{Cloud, GrassBlade, GroundDetail, Particle, TextEffect};
use crate::consts::*;

/// Move every particle and drop the ones that burned out
pub fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= p.decay;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Float text upward, fade it, drop it when invisible
pub fn update_text(effects: &mut Vec<TextEffect>) {
    for e in effects.iter_mut() {
        e.life -= TEXT_FADE;
        e.pos.y -= TEXT_RISE;
    }
    effects.retain(|e| e.life > 0.0);
}

/// Drift clouds left, recycling them past the right edge
pub fn update_clouds(clouds: &mut [Cloud], viewport_width: f32, rng: &mut dyn RandomSource) {
    for cloud in clouds.iter_mut() {
        cloud.pos.x -= cloud.speed * 0.6;
        if cloud.pos.x + cloud.size.x < 0.0 {
            cloud.pos.x = viewport_width + rng.range(0.0, 200.0);
            cloud.pos.y = rng.range(40.0, 160.0);
        }
    }
}

/// Grow, sway and drift grass; wrapped blades regrow from zero
pub fn update_grass(blades: &mut [GrassBlade], viewport_width: f32) {
    for blade in blades.iter_mut() {
        if blade.current_height < blade.base_height {
            blade.current_height = (blade.current_height + 0.4).min(blade.base_height);
        }
        blade.wave_offset += blade.sway_speed;
        blade.x -= blade.move_speed * 0.6;
        if blade.x < -10.0 {
            blade.x = viewport_width + 10.0;
            blade.current_height = 0.0;
        }
    }
}

/// Scroll ground marks with the foreground
pub fn update_ground_details(details: &mut [GroundDetail], viewport_width: f32, speed: f32) {
    for detail in details.iter_mut() {
        detail.pos.x -= speed;
        if detail.pos.x + detail.width < 0.0 {
            detail.pos.x += viewport_width + detail.width + 40.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex;
    use crate::sim::rng::SequenceRng;
    use glam::Vec2;
    use proptest::prelude::*;

    fn spark(life: f32, decay: f32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            size: 2.0,
            color: hex(0xffffff),
            life,
            decay,
        }
    }

    #[test]
    fn test_particles_move_and_expire() {
        let mut particles = vec![spark(1.0, 0.02), spark(0.01, 0.02)];
        update_particles(&mut particles);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].pos, Vec2::new(1.0, -2.0));
        assert!((particles[0].life - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_text_rises_and_fades() {
        let mut effects = vec![TextEffect {
            text: "+50".into(),
            pos: Vec2::new(10.0, 100.0),
            color: hex(0x00ffcc),
            life: 1.0,
        }];
        update_text(&mut effects);
        assert_eq!(effects[0].pos.y, 97.5);

        for _ in 0..40 {
            update_text(&mut effects);
        }
        assert!(effects.is_empty());
    }

    #[test]
    fn test_cloud_wraps_right() {
        let mut rng = SequenceRng::constant(0.5);
        let mut clouds = vec![Cloud {
            pos: Vec2::new(-99.9, 50.0),
            size: Vec2::new(100.0, 30.0),
            speed: 0.5,
            opacity: 0.3,
        }];
        update_clouds(&mut clouds, 800.0, &mut rng);
        assert_eq!(clouds[0].pos.x, 900.0);
        assert_eq!(clouds[0].pos.y, 100.0);
    }

    #[test]
    fn test_grass_wraps_and_regrows() {
        let mut blades = vec![GrassBlade {
            x: -9.9,
            base_height: 10.0,
            current_height: 10.0,
            wave_offset: 0.0,
            sway_speed: 0.01,
            move_speed: 0.5,
        }];
        update_grass(&mut blades, 800.0);
        assert_eq!(blades[0].x, 810.0);
        assert_eq!(blades[0].current_height, 0.0);
    }

    #[test]
    fn test_ground_details_wrap() {
        let mut details = vec![GroundDetail {
            pos: Vec2::new(-15.0, 650.0),
            width: 20.0,
        }];
        update_ground_details(&mut details, 800.0, 7.0);
        assert!(details[0].pos.x > 800.0);
    }

    proptest! {
        #[test]
        fn dead_particles_are_culled(lives in proptest::collection::vec(-0.5f32..1.0, 0..64),
                                     decay in 0.015f32..0.04) {
            let mut particles: Vec<_> = lives.iter().map(|&l| spark(l, decay)).collect();
            update_particles(&mut particles);
            prop_assert!(particles.iter().all(|p| p.life > 0.0));
        }
    }
}
