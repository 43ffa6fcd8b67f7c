//! Scene composition: light rig and layered group rotation.
//!
//! The rig shades whatever solid geometry shares the scene; the particles
//! themselves are unlit, shader-colored sprites. Rotation angles are
//! recomputed from absolute elapsed time every frame - never accumulated -
//! so a dropped frame or variable frame timing cannot drift the scene.

use bytemuck::{Pod, Zeroable};

use stardrift_shared::constants::{FIELD_RATE_X, FIELD_RATE_Z, OUTER_GROUP_RATE_Y};
use stardrift_shared::{Color, Vec3};

/// Light kind discriminant: ambient fill.
pub const LIGHT_AMBIENT: u32 = 0;
/// Light kind discriminant: directional.
pub const LIGHT_DIRECTIONAL: u32 = 1;
/// Light kind discriminant: point.
pub const LIGHT_POINT: u32 = 2;

/// A single light source, packed for GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Light {
    /// Position (point) or direction origin (directional); unused for ambient.
    pub position: [f32; 3],
    /// Light intensity.
    pub intensity: f32,
    /// Light color.
    pub color: [f32; 3],
    /// One of the `LIGHT_*` discriminants.
    pub kind: u32,
}

impl Light {
    /// Creates a low-intensity ambient fill light.
    #[must_use]
    pub const fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            position: [0.0; 3],
            intensity,
            color: color.to_array(),
            kind: LIGHT_AMBIENT,
        }
    }

    /// Creates a directional light.
    #[must_use]
    pub const fn directional(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position: position.to_array(),
            intensity,
            color: color.to_array(),
            kind: LIGHT_DIRECTIONAL,
        }
    }

    /// Creates a point light.
    #[must_use]
    pub const fn point(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position: position.to_array(),
            intensity,
            color: color.to_array(),
            kind: LIGHT_POINT,
        }
    }

    /// Violet accent, the directional key color.
    pub const VIOLET: Color = Color::new(0.545, 0.361, 0.965);
    /// Sky-blue accent, the point light color.
    pub const SKY: Color = Color::new(0.055, 0.647, 0.914);
    /// Neutral white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
}

/// The fixed three-light rig.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightRig {
    /// Ambient, directional, point - in that order.
    pub lights: [Light; 3],
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            lights: [
                Light::ambient(Light::WHITE, 0.2),
                Light::directional(Vec3::new(5.0, 5.0, 5.0), Light::VIOLET, 0.5),
                Light::point(Vec3::new(-5.0, 2.0, -10.0), Light::SKY, 0.5),
            ],
        }
    }
}

impl LightRig {
    /// Raw bytes for uniform upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Per-group rotation angles for one frame, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupRotations {
    /// Outer group: rotates about the vertical axis only.
    pub outer: Vec3,
    /// Particle sub-group: additional horizontal and depth axis rotation.
    pub field: Vec3,
}

/// One composed frame: everything the draw pass needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneFrame {
    /// Absolute elapsed time this frame was composed at.
    pub time: f32,
    /// Rotation angles, derived from `time`.
    pub rotations: GroupRotations,
    /// The light rig.
    pub rig: LightRig,
}

/// Arranges the lights and applies continuous rotation to the particle
/// group and sub-group.
#[derive(Debug, Clone, Default)]
pub struct SceneComposer {
    rig: LightRig,
}

impl SceneComposer {
    /// Creates a composer with a custom rig.
    #[must_use]
    pub const fn new(rig: LightRig) -> Self {
        Self { rig }
    }

    /// Rotation angles at an absolute time.
    ///
    /// Always `elapsed * rate` - pure in `time`, so two calls with the
    /// same clock value agree exactly regardless of frame history.
    #[must_use]
    pub fn rotations(time: f32) -> GroupRotations {
        GroupRotations {
            outer: Vec3::new(0.0, time * OUTER_GROUP_RATE_Y, 0.0),
            field: Vec3::new(time * FIELD_RATE_X, 0.0, time * FIELD_RATE_Z),
        }
    }

    /// Composes the frame for an absolute elapsed time.
    #[must_use]
    pub fn compose(&self, time: f32) -> SceneFrame {
        SceneFrame {
            time,
            rotations: Self::rotations(time),
            rig: self.rig,
        }
    }

    /// The composer's light rig.
    #[must_use]
    pub fn rig(&self) -> &LightRig {
        &self.rig
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rig_layout() {
        let size = std::mem::size_of::<LightRig>();
        assert_eq!(size, 3 * 32);
        assert_eq!(size % 16, 0);
    }

    #[test]
    fn test_default_rig_order() {
        let rig = LightRig::default();
        assert_eq!(rig.lights[0].kind, LIGHT_AMBIENT);
        assert_eq!(rig.lights[1].kind, LIGHT_DIRECTIONAL);
        assert_eq!(rig.lights[2].kind, LIGHT_POINT);
        assert!((rig.lights[0].intensity - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_is_linear_in_time() {
        let at_ten = SceneComposer::rotations(10.0);
        assert!((at_ten.outer.y - 0.5).abs() < 1e-6);
        assert!((at_ten.field.x - 0.3).abs() < 1e-6);
        assert!((at_ten.field.z - 0.2).abs() < 1e-6);
        assert_eq!(at_ten.outer.x, 0.0);
        assert_eq!(at_ten.field.y, 0.0);
    }

    #[test]
    fn test_compose_has_no_accumulated_state() {
        let composer = SceneComposer::default();
        // Wildly different frame histories, same clock value.
        let a = composer.compose(3.5);
        let _skip = composer.compose(900.0);
        let b = composer.compose(3.5);
        assert_eq!(a, b);
    }
}
