//! Shape generation for 2D primitives
//!
//! All shapes are triangle lists in pixel space (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;
use crate::Color;

const CORNER_SEGMENTS: u32 = 6;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    quad(
        min,
        Vec2::new(min.x + size.x, min.y),
        min + size,
        Vec2::new(min.x, min.y + size.y),
        [color; 4],
    )
}

/// Rectangle with a color per corner (top-left, top-right, bottom-right, bottom-left)
pub fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, corner_colors: [Color; 4]) -> Vec<Vertex> {
    let [ca, cb, cc, cd] = corner_colors;
    vec![
        Vertex::at(a, ca),
        Vertex::at(b, cb),
        Vertex::at(c, cc),
        Vertex::at(a, ca),
        Vertex::at(c, cc),
        Vertex::at(d, cd),
    ]
}

/// Rectangle fading from `top` to `bottom`
pub fn vertical_gradient(min: Vec2, size: Vec2, top: Color, bottom: Color) -> Vec<Vertex> {
    quad(
        min,
        Vec2::new(min.x + size.x, min.y),
        min + size,
        Vec2::new(min.x, min.y + size.y),
        [top, top, bottom, bottom],
    )
}

/// Rectangle shaded from its top-left corner (`from`) to its bottom-right (`to`)
pub fn diagonal_gradient(min: Vec2, size: Vec2, from: Color, to: Color) -> Vec<Vertex> {
    let mid = [
        (from[0] + to[0]) / 2.0,
        (from[1] + to[1]) / 2.0,
        (from[2] + to[2]) / 2.0,
        (from[3] + to[3]) / 2.0,
    ];
    quad(
        min,
        Vec2::new(min.x + size.x, min.y),
        min + size,
        Vec2::new(min.x, min.y + size.y),
        [from, mid, to, mid],
    )
}

/// Outline of a rectangle drawn inside its bounds
pub fn rect_outline(min: Vec2, size: Vec2, thickness: f32, color: Color) -> Vec<Vertex> {
    let t = thickness.min(size.x / 2.0).min(size.y / 2.0);
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(min, Vec2::new(size.x, t), color));
    vertices.extend(rect(Vec2::new(min.x, min.y + size.y - t), Vec2::new(size.x, t), color));
    vertices.extend(rect(Vec2::new(min.x, min.y + t), Vec2::new(t, size.y - 2.0 * t), color));
    vertices.extend(rect(
        Vec2::new(min.x + size.x - t, min.y + t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    ));
    vertices
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: Color) -> Vec<Vertex> {
    vec![Vertex::at(a, color), Vertex::at(b, color), Vertex::at(c, color)]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Filled axis-aligned ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: Color, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(center: Vec2, inner_radius: f32, outer_radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    arc_stroke(
        center,
        Vec2::splat((inner_radius + outer_radius) / 2.0),
        0.0,
        2.0 * PI,
        outer_radius - inner_radius,
        color,
        segments,
    )
}

/// Stroked elliptical arc from `start` to `end` (radians, clockwise on screen)
pub fn arc_stroke(
    center: Vec2,
    radii: Vec2,
    start: f32,
    end: f32,
    thickness: f32,
    color: Color,
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let half = thickness / 2.0;
    let span = end - start;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    let point = |theta: f32, offset: f32| {
        Vec2::new(
            center.x + (radii.x + offset) * theta.cos(),
            center.y + (radii.y + offset) * theta.sin(),
        )
    };

    for i in 0..segments {
        let theta1 = start + span * (i as f32 / segments as f32);
        let theta2 = start + span * ((i + 1) as f32 / segments as f32);

        let inner1 = point(theta1, -half);
        let outer1 = point(theta1, half);
        let inner2 = point(theta2, -half);
        let outer2 = point(theta2, half);

        // Two triangles per segment
        vertices.push(Vertex::at(inner1, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(inner2, color));

        vertices.push(Vertex::at(inner2, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(outer2, color));
    }

    vertices
}

/// Thick line segment
pub fn line(a: Vec2, b: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(a + perp, b + perp, b - perp, a - perp, [color; 4])
}

/// Fan around the centroid; fine for star-shaped outlines
pub fn polygon(points: &[Vec2], color: Color) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
    let mut vertices = Vec::with_capacity(points.len() * 3);
    for (i, &p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        vertices.push(Vertex::at(centroid, color));
        vertices.push(Vertex::at(p, color));
        vertices.push(Vertex::at(next, color));
    }
    vertices
}

/// Filled circular sector from `start` to `end` (radians, clockwise on screen)
pub fn sector(center: Vec2, radius: f32, start: f32, end: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = end - start;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    for i in 0..segments {
        let theta1 = start + span * (i as f32 / segments as f32);
        let theta2 = start + span * ((i + 1) as f32 / segments as f32);
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta1) * radius, color));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta2) * radius, color));
    }
    vertices
}

/// Rectangle with rounded corners. Pieces never overlap, so translucent
/// colors blend once.
pub fn rounded_rect(min: Vec2, size: Vec2, radius: f32, color: Color) -> Vec<Vertex> {
    let r = radius.max(0.0).min(size.x / 2.0).min(size.y / 2.0);
    if r == 0.0 {
        return rect(min, size, color);
    }
    let mut vertices = Vec::with_capacity(18 + 4 * CORNER_SEGMENTS as usize * 3);
    vertices.extend(rect(Vec2::new(min.x + r, min.y), Vec2::new(size.x - 2.0 * r, size.y), color));
    vertices.extend(rect(Vec2::new(min.x, min.y + r), Vec2::new(r, size.y - 2.0 * r), color));
    vertices.extend(rect(
        Vec2::new(min.x + size.x - r, min.y + r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    ));
    let corners = [
        (Vec2::new(min.x + r, min.y + r), PI),
        (Vec2::new(min.x + size.x - r, min.y + r), 1.5 * PI),
        (Vec2::new(min.x + size.x - r, min.y + size.y - r), 0.0),
        (Vec2::new(min.x + r, min.y + size.y - r), 0.5 * PI),
    ];
    for (corner, start) in corners {
        vertices.extend(sector(corner, r, start, start + FRAC_PI_2, color, CORNER_SEGMENTS));
    }
    vertices
}

/// Rotate vertices about `pivot` (radians, clockwise on screen)
pub fn rotate_about(vertices: &mut [Vertex], pivot: Vec2, angle: f32) {
    if angle == 0.0 {
        return;
    }
    let rot = Vec2::from_angle(angle);
    for v in vertices.iter_mut() {
        let p = pivot + rot.rotate(v.pos() - pivot);
        v.position = p.to_array();
    }
}

pub fn translate(vertices: &mut [Vertex], offset: Vec2) {
    if offset == Vec2::ZERO {
        return;
    }
    for v in vertices.iter_mut() {
        v.position[0] += offset.x;
        v.position[1] += offset.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex;

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), hex(0xffffff));
        assert_eq!(v.len(), 6);
        assert!(v.iter().any(|v| v.position == [40.0, 60.0]));
        assert!(v.iter().any(|v| v.position == [10.0, 20.0]));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut v = vec![Vertex::new(1.0, 0.0, hex(0xffffff))];
        rotate_about(&mut v, Vec2::ZERO, PI / 2.0);
        assert!((v[0].position[0]).abs() < 1e-5);
        assert!((v[0].position[1] - 1.0).abs() < 1e-5);
    }

    fn area(vertices: &[Vertex]) -> f32 {
        vertices
            .chunks(3)
            .map(|t| {
                let (a, b, c) = (t[0].pos(), t[1].pos(), t[2].pos());
                (b - a).perp_dot(c - a).abs() / 2.0
            })
            .sum()
    }

    #[test]
    fn test_rounded_rect_pieces_do_not_overlap() {
        let r = 8.0;
        let v = rounded_rect(Vec2::new(5.0, 5.0), Vec2::new(40.0, 40.0), r, hex(0xffffff));
        let corner_fan = CORNER_SEGMENTS as f32 * 0.5 * r * r * (FRAC_PI_2 / CORNER_SEGMENTS as f32).sin();
        let expected = 40.0 * 40.0 - 4.0 * (r * r - corner_fan);
        assert!((area(&v) - expected).abs() < 0.05, "{} vs {}", area(&v), expected);
        // Nothing leaves the bounds
        assert!(v.iter().all(|v| {
            let p = v.pos();
            (5.0 - 1e-3..=45.0 + 1e-3).contains(&p.x) && (5.0 - 1e-3..=45.0 + 1e-3).contains(&p.y)
        }));
    }

    #[test]
    fn test_rounded_rect_zero_radius_is_rect() {
        let v = rounded_rect(Vec2::ZERO, Vec2::new(10.0, 4.0), 0.0, hex(0xffffff));
        assert_eq!(v.len(), 6);
        assert!((area(&v) - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_polygon_needs_three_points() {
        assert!(polygon(&[Vec2::ZERO, Vec2::ONE], hex(0xffffff)).is_empty());
        assert_eq!(polygon(&[Vec2::ZERO, Vec2::X, Vec2::Y], hex(0xffffff)).len(), 9);
    }
}
