#![deny(unsafe_code)]
//! Core of the particle-field background.
//!
//! Provides the `Particle` value type, the `ParticleField` store, the
//! `PointerTracker`, the per-tick `stepper`, the `Surface` trait and
//! `renderer`, and the `Simulation` driver that hosts call once per display
//! refresh. Peripheral site behaviour lives alongside: `Theme` with its
//! persisted preference flag, and the `magnet` cursor offset.

pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod magnet;
pub mod params;
pub mod particle;
pub mod pointer;
pub mod prng;
pub mod renderer;
pub mod seed;
pub mod stepper;
pub mod store;
pub mod surface;
pub mod theme;

pub use color::{Rgba, Srgb};
pub use config::FieldParams;
pub use driver::{FrameStatus, Simulation};
pub use error::FieldError;
pub use particle::Particle;
pub use pointer::{PointerState, PointerTracker};
pub use prng::Xorshift64;
pub use seed::Seed;
pub use store::ParticleField;
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use theme::{MemoryPreferences, PreferenceStore, Theme, ThemeController};
