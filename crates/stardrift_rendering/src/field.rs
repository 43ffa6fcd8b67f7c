//! Procedural particle field generation.
//!
//! Particles are sampled once, at mount time, onto a spherical shell.
//! The polar angle uses `acos(2u - 1)` so the distribution is uniform over
//! the sphere - naive angle sampling would cluster particles at the poles.

use bytemuck::{Pod, Zeroable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use stardrift_shared::math::lerp;
use stardrift_shared::{Color, Vec3};

/// A single particle, packed into vec4 lanes for GPU upload.
///
/// Immutable after generation. The per-frame pulse factor is derived in
/// the vertex stage, never stored here.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position (xyz) + base sprite size (w).
    pub position_size: [f32; 4],
    /// Color (rgb) + padding (w).
    pub color: [f32; 4],
}

impl Particle {
    /// Size of a particle in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Creates a particle from its components.
    #[must_use]
    pub const fn new(position: Vec3, size: f32, color: Color) -> Self {
        Self {
            position_size: [position.x, position.y, position.z, size],
            color: [color.r, color.g, color.b, 0.0],
        }
    }

    /// Position in field-local space.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        Vec3::new(
            self.position_size[0],
            self.position_size[1],
            self.position_size[2],
        )
    }

    /// Base sprite size before the perspective/pulse scaling.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.position_size[3]
    }

    /// Particle color.
    #[must_use]
    pub const fn rgb(&self) -> Color {
        Color::new(self.color[0], self.color[1], self.color[2])
    }
}

/// Configuration for particle field generation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Number of particles to generate.
    pub count: u32,
    /// Inner radius of the spherical shell.
    pub base_radius: f32,
    /// Radial thickness of the shell.
    pub spread: f32,
    /// Color at mix factor 0.
    pub primary: Color,
    /// Color at mix factor 1.
    pub secondary: Color,
    /// Smallest base sprite size.
    pub size_min: f32,
    /// Largest base sprite size.
    pub size_max: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 500,
            base_radius: 15.0,
            spread: 10.0,
            primary: Color::new(0.05, 0.36, 0.91),
            secondary: Color::new(1.0, 0.36, 0.96),
            size_min: 0.1,
            size_max: 0.6,
        }
    }
}

/// A fixed-length, ordered set of particles.
///
/// Owned exclusively by the renderer that draws it. The length is set at
/// generation time and never changes.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Generates a field from the given config.
    ///
    /// Deterministic for a given seed. Each particle samples independently:
    /// radius uniform in `[base_radius, base_radius + spread]`, direction
    /// uniform over the sphere, color a linear mix of primary/secondary,
    /// size uniform in the size range.
    ///
    /// `count == 0` yields a valid, empty field - not an error.
    #[must_use]
    pub fn generate(config: &FieldConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut particles = Vec::with_capacity(config.count as usize);

        for _ in 0..config.count {
            let radius = config.base_radius + rng.gen::<f32>() * config.spread;
            let theta = rng.gen::<f32>() * std::f32::consts::TAU;
            // acos(2u - 1): uniform over the sphere, no pole clustering.
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();

            let position = Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            );

            let mix = rng.gen::<f32>();
            let color = config.primary.lerp(config.secondary, mix);
            let size = lerp(config.size_min, config.size_max, rng.gen::<f32>());

            particles.push(Particle::new(position, size, color));
        }

        tracing::debug!(count = particles.len(), "generated particle field");
        Self { particles }
    }

    /// Number of particles in the field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True if the field holds no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The particles, in generation order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Raw bytes for vertex buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }
}
