//! # STARDRIFT
//!
//! The engine crate, integrating every subsystem behind one scheduler.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                        STARDRIFT ENGINE                            │
//! ├────────────────────────────────────────────────────────────────────┤
//! │                                                                    │
//! │  ┌─────────────────┐      ┌─────────────────┐                      │
//! │  │   RENDERING     │      │    MOTION       │                      │
//! │  │                 │      │                 │                      │
//! │  │  • Field        │      │  • Trackers     │                      │
//! │  │  • Sprites      │      │  • Parallax     │                      │
//! │  │  • Scene/Lights │      │  • Reveal       │                      │
//! │  └────────▲────────┘      │  • Navigator    │                      │
//! │           │               └────────▲────────┘                      │
//! │           │                        │                               │
//! │  ┌────────┴────────────────────────┴────────┐     ┌─────────────┐  │
//! │  │              Engine::tick                │<────│ Event queue │  │
//! │  │  drain ─> progress ─> motion ─> commit   │     │ (from page) │  │
//! │  └──────────────────────────────────────────┘     └─────────────┘  │
//! │                                                                    │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML configuration, loaded once at startup
//! - `events`: the bounded page event queue
//! - `engine`: the frame scheduler

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod events;

// Re-export the subsystem crates
pub use stardrift_motion as motion;
pub use stardrift_rendering as rendering;
pub use stardrift_shared as shared;

// Re-export commonly used types
pub use config::{ConfigError, EngineConfig, FieldSettings, SectionConfig};
pub use engine::{Engine, FrameStats, MAX_DELTA_TIME};
pub use events::{EventBus, EventReceiver, EventSender, PageEvent};
