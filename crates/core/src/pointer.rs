//! Pointer tracking.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Latest known pointer position over the tracked surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerState {
    /// The pointer is not over the surface.
    #[default]
    Absent,
    /// The pointer was last seen at this position.
    At(DVec2),
}

impl PointerState {
    pub fn at(x: f64, y: f64) -> Self {
        PointerState::At(DVec2::new(x, y))
    }

    pub fn position(self) -> Option<DVec2> {
        match self {
            PointerState::Absent => None,
            PointerState::At(p) => Some(p),
        }
    }
}

/// Holds the last committed pointer state. Last writer wins; there is no
/// queue of events, the stepper reads whatever was written most recently.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    state: PointerState,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_move(&mut self, x: f64, y: f64) {
        self.state = PointerState::at(x, y);
    }

    pub fn on_leave(&mut self) {
        self.state = PointerState::Absent;
    }

    pub fn current(&self) -> PointerState {
        self.state
    }
}
