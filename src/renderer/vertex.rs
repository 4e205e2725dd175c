//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::Color;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(p: Vec2, color: Color) -> Self {
        Self::new(p.x, p.y, color)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Fixed colors for scenery that doesn't follow the theme
pub mod colors {
    use crate::{Color, hex};

    pub const SKY_TINT: Color = [10.0 / 255.0, 20.0 / 255.0, 40.0 / 255.0, 0.2];
    pub const TRANSPARENT: Color = [0.0, 0.0, 0.0, 0.0];
    pub const CLOUD: Color = hex(0x406080);
    pub const MOON: Color = hex(0xe0e0ff);
    pub const MOON_RING: Color = hex(0x00f0ff);
    pub const LED_ALT: Color = hex(0xb040ff);
    pub const GROUND: Color = hex(0x0f1525);
    pub const GROUND_STRIP: Color = hex(0x121828);
    pub const GROUND_DETAIL: Color = [0.0, 0.94, 1.0, 0.15];
    pub const GRASS: Color = hex(0x00f0ff);
    pub const GRASS_TIP: Color = hex(0x00ffcc);
    pub const WHITE: Color = hex(0xffffff);
    pub const BLACK: Color = hex(0x000000);
    pub const BODY_SHEEN: Color = [0.0, 0.94, 1.0, 0.3];
    pub const BODY_OUTLINE: Color = [0.0, 0.94, 1.0, 0.6];
    pub const TONGUE: Color = hex(0xb040ff);
}
