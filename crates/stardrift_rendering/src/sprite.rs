//! Point sprite rendering for the particle field.
//!
//! Each particle becomes a screen-aligned circular sprite. The sprite
//! pipeline has exactly one per-frame input: the elapsed-time uniform.
//! Everything else (pulse, apparent size, circular mask, rim falloff) is
//! derived in the shader from that one value.
//!
//! ## Overdraw contract
//!
//! Blending is **ADDITIVE** (ONE + ONE) with depth write disabled:
//! - No sorting required (additive is commutative: A+B = B+A)
//! - Overlapping transparent sprites brighten instead of occluding
//! - No popping artifacts from depth-sorted transparency
//!
//! This is what makes the glow/dust effect read as glow rather than as a
//! cloud of grey discs.

use bytemuck::{Pod, Zeroable};

use stardrift_shared::constants::{PERSPECTIVE_SCALE, PULSE_X_FREQUENCY};
use stardrift_shared::math::smoothstep;

use crate::field::{Particle, ParticleField};

/// Per-frame shader uniforms.
///
/// Layout matches the WGSL `SpriteUniforms` struct. 16-byte aligned.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct TimeUniform {
    /// Elapsed render-clock seconds.
    pub time: f32,
    /// Fixed on-screen-size-versus-depth tuning constant.
    pub perspective_scale: f32,
    /// Padding for alignment.
    pub _pad: [f32; 2],
}

/// Camera matrices and screen parameters for the sprite pass.
///
/// Layout matches the WGSL `CameraUniforms` struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniforms {
    /// View matrix (column major).
    pub view: [[f32; 4]; 4],
    /// Projection matrix (column major).
    pub proj: [[f32; 4]; 4],
    /// Screen dimensions (width, height, 1/width, 1/height).
    pub screen: [f32; 4],
}

impl CameraUniforms {
    /// Creates camera uniforms from matrices and the surface size.
    #[must_use]
    pub fn new(view: [[f32; 4]; 4], proj: [[f32; 4]; 4], width: f32, height: f32) -> Self {
        Self {
            view,
            proj,
            screen: [width, height, 1.0 / width, 1.0 / height],
        }
    }
}

/// Identity matrix, the default camera pose.
const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

impl Default for CameraUniforms {
    fn default() -> Self {
        Self::new(IDENTITY, IDENTITY, 1920.0, 1080.0)
    }
}

/// Per-sprite size pulse: `sin(time + x * 0.5) * 0.5 + 0.5`.
///
/// Deterministic given time and the particle's x coordinate, independent
/// of y/z, and always in `[0, 1]`.
#[must_use]
pub fn pulse(time: f32, x: f32) -> f32 {
    (time + x * PULSE_X_FREQUENCY).sin() * 0.5 + 0.5
}

/// Apparent on-screen sprite size.
///
/// `view_depth` is the particle's view-space z - negative in front of the
/// camera. Sprites at or behind the camera plane collapse to zero instead
/// of inverting.
#[must_use]
pub fn apparent_size(base_size: f32, view_depth: f32, pulse: f32) -> f32 {
    if view_depth >= 0.0 {
        return 0.0;
    }
    base_size * (PERSPECTIVE_SCALE / -view_depth) * (0.5 + 0.5 * pulse)
}

/// Fragment-stage alpha for a pixel at `dist` from the sprite center in
/// normalized sprite space.
///
/// Pixels beyond 0.5 are discarded (circular mask); the rim between 0.5
/// and 0.4 fades smoothly for an antialiased edge. `None` means discard.
#[must_use]
pub fn mask_alpha(dist: f32) -> Option<f32> {
    if dist > 0.5 {
        return None;
    }
    Some(smoothstep(0.5, 0.4, dist))
}

/// The point sprite renderer.
///
/// Owns its field exclusively. Per-frame work is a single uniform write;
/// the pipeline state accessors describe the rest of the draw to whoever
/// owns the GPU device.
#[derive(Debug, Clone, Default)]
pub struct PointSpriteRenderer {
    field: ParticleField,
    uniform: TimeUniform,
}

impl PointSpriteRenderer {
    /// Vertex attributes: position+size and color, one instance per particle.
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

    /// Creates a renderer that takes ownership of the field.
    #[must_use]
    pub fn new(field: ParticleField) -> Self {
        Self {
            field,
            uniform: TimeUniform {
                time: 0.0,
                perspective_scale: PERSPECTIVE_SCALE,
                _pad: [0.0; 2],
            },
        }
    }

    /// Commits the per-frame time uniform.
    ///
    /// `time` is absolute elapsed render-clock seconds, never a delta.
    pub fn update(&mut self, time: f32) {
        self.uniform.time = time;
        self.uniform.perspective_scale = PERSPECTIVE_SCALE;
    }

    /// The committed time value.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.uniform.time
    }

    /// The rendered field.
    #[must_use]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Uniform bytes for GPU upload.
    #[must_use]
    pub fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.uniform)
    }

    /// Additive blend state: ONE + ONE for both color and alpha.
    #[must_use]
    pub const fn blend_state() -> wgpu::BlendState {
        wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        }
    }

    /// Color target for the sprite pass.
    #[must_use]
    pub const fn color_target(format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format,
            blend: Some(Self::blend_state()),
            write_mask: wgpu::ColorWrites::ALL,
        }
    }

    /// Depth state: read, never write.
    ///
    /// Sprites are occluded by solid geometry but never occlude each other.
    #[must_use]
    pub fn depth_stencil(format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }

    /// Instance buffer layout matching [`Particle`].
    #[must_use]
    pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Particle::SIZE as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Vertex shader source.
    ///
    /// Contract: uniforms are named `camera` (group 0, binding 0) and
    /// `sprite` (group 0, binding 1); instance attributes are
    /// `position_size` and `color`.
    #[must_use]
    pub fn vertex_shader() -> &'static str {
        SPRITE_VERTEX_WGSL
    }

    /// Fragment shader source.
    #[must_use]
    pub fn fragment_shader() -> &'static str {
        SPRITE_FRAGMENT_WGSL
    }
}

/// Sprite vertex shader.
///
/// Expands each particle into a screen-aligned quad sized by perspective
/// depth and the time-driven pulse.
const SPRITE_VERTEX_WGSL: &str = r#"
// Point Sprite Vertex Shader
// One instance per particle, six vertices per quad.

struct CameraUniforms {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    // Screen dimensions (width, height, 1/width, 1/height)
    screen: vec4<f32>,
}

struct SpriteUniforms {
    time: f32,
    perspective_scale: f32,
    _pad: vec2<f32>,
}

struct VertexInput {
    // xyz = position, w = base size
    @location(0) position_size: vec4<f32>,
    // rgb = color, w unused
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec3<f32>,
}

@group(0) @binding(0) var<uniform> camera: CameraUniforms;
@group(0) @binding(1) var<uniform> sprite: SpriteUniforms;

const QUAD_POSITIONS: array<vec2<f32>, 6> = array<vec2<f32>, 6>(
    vec2<f32>(-0.5, -0.5),
    vec2<f32>(0.5, -0.5),
    vec2<f32>(0.5, 0.5),
    vec2<f32>(-0.5, -0.5),
    vec2<f32>(0.5, 0.5),
    vec2<f32>(-0.5, 0.5),
);

const QUAD_UVS: array<vec2<f32>, 6> = array<vec2<f32>, 6>(
    vec2<f32>(0.0, 1.0),
    vec2<f32>(1.0, 1.0),
    vec2<f32>(1.0, 0.0),
    vec2<f32>(0.0, 1.0),
    vec2<f32>(1.0, 0.0),
    vec2<f32>(0.0, 0.0),
);

@vertex
fn main(
    @builtin(vertex_index) vertex_idx: u32,
    in: VertexInput,
) -> VertexOutput {
    var out: VertexOutput;

    let mv_position = camera.view * vec4<f32>(in.position_size.xyz, 1.0);

    // Animated size pulsing - deterministic in (time, x).
    let pulse = sin(sprite.time + in.position_size.x * 0.5) * 0.5 + 0.5;

    // Apparent size in pixels; collapses behind the camera plane.
    var point_size = 0.0;
    if mv_position.z < 0.0 {
        point_size = in.position_size.w
            * (sprite.perspective_scale / -mv_position.z)
            * (0.5 + 0.5 * pulse);
    }

    let quad_idx = vertex_idx % 6u;
    let corner = QUAD_POSITIONS[quad_idx];

    var clip = camera.proj * mv_position;
    // Pixel offset to NDC: 2 * px / screen, scaled by w for clip space.
    clip.x += corner.x * point_size * 2.0 * camera.screen.z * clip.w;
    clip.y += corner.y * point_size * 2.0 * camera.screen.w * clip.w;

    out.position = clip;
    out.uv = QUAD_UVS[quad_idx];
    out.color = in.color.rgb;
    return out;
}
"#;

/// Sprite fragment shader.
///
/// Circular mask with a smoothstep rim between radius 0.5 and 0.4.
const SPRITE_FRAGMENT_WGSL: &str = r#"
// Point Sprite Fragment Shader
// ADDITIVE BLENDING - framebuffer += output, no sorting, no occlusion.

struct FragmentInput {
    @location(0) uv: vec2<f32>,
    @location(1) color: vec3<f32>,
}

@fragment
fn main(in: FragmentInput) -> @location(0) vec4<f32> {
    // Distance from sprite center in normalized sprite space.
    let xy = in.uv - vec2<f32>(0.5);
    let radius = length(xy);

    // Circular mask.
    if radius > 0.5 {
        discard;
    }

    // Soften the edge.
    let alpha = smoothstep(0.5, 0.4, radius);

    return vec4<f32>(in.color * alpha, alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldConfig;

    #[test]
    fn test_pulse_always_in_unit_interval() {
        for i in -1000..1000 {
            let time = i as f32 * 0.37;
            let x = i as f32 * 1.91;
            let p = pulse(time, x);
            assert!((0.0..=1.0).contains(&p), "pulse out of range: {p}");
        }
    }

    #[test]
    fn test_apparent_size_behind_camera_collapses() {
        assert_eq!(apparent_size(0.5, 1.0, 0.5), 0.0);
        assert_eq!(apparent_size(0.5, 0.0, 0.5), 0.0);
    }

    #[test]
    fn test_apparent_size_shrinks_with_depth() {
        let near = apparent_size(0.5, -10.0, 1.0);
        let far = apparent_size(0.5, -100.0, 1.0);
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn test_mask_discards_outside_circle() {
        assert!(mask_alpha(0.51).is_none());
        assert!(mask_alpha(0.7).is_none());
    }

    #[test]
    fn test_mask_rim_falloff() {
        let center = mask_alpha(0.0).unwrap();
        let inner_rim = mask_alpha(0.4).unwrap();
        let outer_rim = mask_alpha(0.5).unwrap();
        assert!((center - 1.0).abs() < 1e-6);
        assert!((inner_rim - 1.0).abs() < 1e-6);
        assert!(outer_rim.abs() < 1e-6);
        // Monotone fade across the rim.
        assert!(mask_alpha(0.45).unwrap() > outer_rim);
        assert!(mask_alpha(0.45).unwrap() < inner_rim);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<TimeUniform>(), 16);
        assert_eq!(std::mem::size_of::<CameraUniforms>() % 16, 0);
    }

    #[test]
    fn test_update_commits_time() {
        let field = ParticleField::generate(&FieldConfig::default(), 1);
        let mut renderer = PointSpriteRenderer::new(field);
        renderer.update(2.5);
        assert!((renderer.time() - 2.5).abs() < f32::EPSILON);
        assert_eq!(renderer.uniform_bytes().len(), 16);
    }

    #[test]
    fn test_shader_sources_not_empty() {
        assert!(PointSpriteRenderer::vertex_shader().contains("@vertex"));
        assert!(PointSpriteRenderer::fragment_shader().contains("@fragment"));
    }

    #[test]
    fn test_blend_state_is_additive() {
        let blend = PointSpriteRenderer::blend_state();
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::One);
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::One);
    }

    #[test]
    fn test_depth_write_disabled() {
        let depth = PointSpriteRenderer::depth_stencil(wgpu::TextureFormat::Depth32Float);
        assert!(!depth.depth_write_enabled);
    }
}
