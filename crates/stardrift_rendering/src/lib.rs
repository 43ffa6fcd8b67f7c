//! # STARDRIFT Rendering
//!
//! The visual half of the engine: a procedurally generated particle field
//! rendered as additive-blended circular point sprites, composed with a
//! fixed light rig and layered group rotation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    RENDER PIPELINE                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  FieldConfig ─ generate once ─> ParticleField            │
//! │                                      │                   │
//! │  clock ──> SceneComposer ──> rotations + light rig       │
//! │    │                                 │                   │
//! │    └─────> PointSpriteRenderer ──> time uniform + state  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Generation runs exactly once, at construction. Every frame after that
//! is a single time-uniform write plus angle recomputation from absolute
//! elapsed time.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod field;
pub mod scene;
pub mod sprite;

pub use field::{FieldConfig, Particle, ParticleField};
pub use scene::{GroupRotations, Light, LightRig, SceneComposer, SceneFrame};
pub use sprite::{CameraUniforms, PointSpriteRenderer, TimeUniform};
