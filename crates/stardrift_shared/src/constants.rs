//! # Engine Tuning Constants
//!
//! Visual tuning values for the particle scene and the scroll-driven
//! motion layer.
//!
//! **NOTE:** These values are baked into the binary. Changing the feel of
//! the background means a rebuild, not a config change.

// =============================================================================
// SCENE ROTATION
// =============================================================================

/// Outer group rotation rate about the vertical axis (radians per second).
pub const OUTER_GROUP_RATE_Y: f32 = 0.05;

/// Particle sub-group rotation rate about the horizontal axis.
pub const FIELD_RATE_X: f32 = 0.03;

/// Particle sub-group rotation rate about the depth axis.
pub const FIELD_RATE_Z: f32 = 0.02;

// =============================================================================
// POINT SPRITES
// =============================================================================

/// Fixed constant tuning on-screen sprite size versus camera distance.
pub const PERSPECTIVE_SCALE: f32 = 300.0;

/// Spatial frequency of the size pulse along the X axis.
pub const PULSE_X_FREQUENCY: f32 = 0.5;

// =============================================================================
// SCROLL MOTION
// =============================================================================

/// Default parallax speed factor.
pub const DEFAULT_PARALLAX_SPEED: f32 = 0.5;

/// Default start marker: element top reaches viewport bottom.
pub const DEFAULT_START_MARKER: &str = "top bottom";

/// Default end marker: element bottom reaches viewport top.
pub const DEFAULT_END_MARKER: &str = "bottom top";

/// Default intersection threshold for reveal observers.
pub const DEFAULT_REVEAL_THRESHOLD: f32 = 0.1;

/// Reveal transition duration (seconds).
pub const REVEAL_DURATION: f32 = 0.5;

/// Per-element stagger step within a reveal group (seconds).
pub const REVEAL_STAGGER: f32 = 0.1;

/// Hidden-pose vertical offset for reveal transitions (pixels).
pub const REVEAL_HIDDEN_OFFSET: f32 = 30.0;

/// Duration of the eased in-page navigation scroll (seconds).
pub const NAV_SCROLL_DURATION: f32 = 0.6;
