//! Vertex layout shared by the scene builder and the GPU pipeline

use bytemuck::{Pod, Zeroable};

/// Position (playfield pixels or NDC) plus flat RGBA
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

/// Palette
pub mod colors {
    pub const SKY: [f32; 4] = [0.45, 0.75, 0.95, 1.0];
    pub const GATE: [f32; 4] = [0.25, 0.7, 0.25, 1.0];
    pub const GATE_PASSED: [f32; 4] = [0.2, 0.55, 0.2, 1.0];
    pub const GROUND: [f32; 4] = [0.85, 0.75, 0.45, 1.0];
    pub const AVATAR: [f32; 4] = [1.0, 0.85, 0.1, 1.0];
    pub const AVATAR_CRASHED: [f32; 4] = [0.9, 0.2, 0.15, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
