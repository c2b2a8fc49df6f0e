//! Magnetic cursor effect for highlighted page elements.
//!
//! While the pointer is over an element, the element is translated toward
//! the pointer by a fraction of the pointer's offset from the element's
//! centre. When the pointer leaves, the offset returns to zero.

use glam::DVec2;

use crate::pointer::PointerState;

/// Fraction of the pointer offset applied to the element.
pub const DEFAULT_MAGNET_STRENGTH: f64 = 0.3;

/// Translation to apply to an element centred at `center`.
pub fn magnetic_offset(center: DVec2, pointer: PointerState, strength: f64) -> DVec2 {
    match pointer {
        PointerState::Absent => DVec2::ZERO,
        PointerState::At(p) => (p - center) * strength,
    }
}
