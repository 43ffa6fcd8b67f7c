//! # STARDRIFT Shared
//!
//! Common types used by the rendering and motion subsystems.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `wgpu`
//! - Any GPU or window-related crate
//!
//! If you need graphics types, put them in `stardrift_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use math::{Color, Vec3};
