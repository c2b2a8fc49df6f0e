#![deny(unsafe_code)]
//! CPU rendering for the particle-field simulator.
//!
//! [`Pixmap`] implements the core `Surface` trait over an RGBA8 buffer so the
//! simulation can run without a browser. The `png` feature adds
//! [`snapshot::write_png`].

pub mod pixmap;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixmap::Pixmap;
