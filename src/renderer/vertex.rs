//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
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

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const GROUND: [f32; 4] = [0.36, 0.55, 0.25, 1.0];
    pub const WALL: [f32; 4] = [0.45, 0.35, 0.25, 1.0];
    pub const CANNON: [f32; 4] = [0.2, 0.2, 0.22, 1.0];
    pub const PROJECTILE: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
    pub const TARGET: [f32; 4] = [0.85, 0.25, 0.2, 1.0];
    pub const TARGET_COOLING: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
    pub const TARGET_INERT: [f32; 4] = [0.5, 0.5, 0.5, 0.35];
    pub const PREVIEW: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    pub const POWER_FILL: [f32; 4] = [0.95, 0.55, 0.1, 1.0];
    pub const POWER_BACK: [f32; 4] = [0.0, 0.0, 0.0, 0.3];
    pub const SEGMENT_LIT: [f32; 4] = [0.95, 0.1, 0.1, 1.0];
    pub const SEGMENT_UNLIT: [f32; 4] = [0.3, 0.1, 0.1, 0.25];
}
