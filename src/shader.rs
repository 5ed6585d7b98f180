//! GPU-side sprite format and the WGSL program that draws it.
//!
//! Every visible element of the backdrop is a circle: glow layers are large
//! radial gradients, dust particles are small antialiased discs, and larger
//! particles also carry a faint gradient halo. They share one instance format
//! and one shader; the [`Falloff`] tag picks the alpha profile.

use bytemuck::{Pod, Zeroable};

/// WGSL source for the sprite pipelines.
pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// How alpha falls off from the center of a sprite to its rim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Falloff {
    /// Linear gradient from full color at the center to transparent at the rim.
    Glow = 0,
    /// Solid disc with an antialiased edge.
    Disc = 1,
    /// Linear gradient, used beneath large dust particles.
    Halo = 2,
}

/// One circle instance, in physical pixels with `y` pointing down.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Sprite {
    pub center: [f32; 2],
    pub radius: f32,
    pub falloff: u32,
    /// Straight (non-premultiplied) RGBA.
    pub color: [f32; 4],
}

impl Sprite {
    pub fn new(center: [f32; 2], radius: f32, falloff: Falloff, color: [f32; 4]) -> Self {
        Self {
            center,
            radius,
            falloff: falloff as u32,
            color,
        }
    }

    pub fn falloff(&self) -> Option<Falloff> {
        match self.falloff {
            0 => Some(Falloff::Glow),
            1 => Some(Falloff::Disc),
            2 => Some(Falloff::Halo),
            _ => None,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2, // center
        },
        wgpu::VertexAttribute {
            offset: 8,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32, // radius
        },
        wgpu::VertexAttribute {
            offset: 12,
            shader_location: 2,
            format: wgpu::VertexFormat::Uint32, // falloff
        },
        wgpu::VertexAttribute {
            offset: 16,
            shader_location: 3,
            format: wgpu::VertexFormat::Float32x4, // color
        },
    ];

    /// Per-instance vertex buffer layout matching `SpriteIn` in the shader.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Sprite>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    /// Surface size in physical pixels.
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}

impl Uniforms {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: [width, height],
            _padding: [0.0; 2],
        }
    }
}
