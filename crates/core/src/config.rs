//! Tunable constants of the particle field.
//!
//! The defaults reproduce the site's living background. Hosts may override
//! any of them through a JSON params object.

use crate::error::FieldError;
use crate::params::{checked_f64, param_f64};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Viewport area (in square device-independent pixels) per particle.
pub const DEFAULT_AREA_PER_PARTICLE: f64 = 9000.0;
/// Velocity components are drawn from `[-DEFAULT_MAX_SPEED, DEFAULT_MAX_SPEED]`.
pub const DEFAULT_MAX_SPEED: f64 = 0.25;
pub const DEFAULT_MIN_RADIUS: f64 = 0.5;
pub const DEFAULT_MAX_RADIUS: f64 = 2.0;
pub const DEFAULT_MIN_OPACITY: f64 = 0.1;
pub const DEFAULT_MAX_OPACITY: f64 = 0.6;
/// Radius of the pointer's influence zone.
pub const DEFAULT_INTERACTION_RADIUS: f64 = 100.0;
/// Damping applied to the pointer displacement each tick.
pub const DEFAULT_POINTER_STRENGTH: f64 = 0.05;
/// Upper bound on the particle count for any viewport.
pub const MAX_PARTICLES: usize = 100_000;

/// Simulation parameters for the particle field.
///
/// Use [`Default`] for the site's stock background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
    pub area_per_particle: f64,
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub interaction_radius: f64,
    pub pointer_strength: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            area_per_particle: DEFAULT_AREA_PER_PARTICLE,
            max_speed: DEFAULT_MAX_SPEED,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            min_opacity: DEFAULT_MIN_OPACITY,
            max_opacity: DEFAULT_MAX_OPACITY,
            interaction_radius: DEFAULT_INTERACTION_RADIUS,
            pointer_strength: DEFAULT_POINTER_STRENGTH,
        }
    }
}

/// Keys accepted in a params object, in schema order.
const KEYS: &[&str] = &[
    "area_per_particle",
    "max_speed",
    "min_radius",
    "max_radius",
    "min_opacity",
    "max_opacity",
    "interaction_radius",
    "pointer_strength",
];

impl FieldParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing or mistyped keys.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            area_per_particle: param_f64(params, "area_per_particle", d.area_per_particle),
            max_speed: param_f64(params, "max_speed", d.max_speed),
            min_radius: param_f64(params, "min_radius", d.min_radius),
            max_radius: param_f64(params, "max_radius", d.max_radius),
            min_opacity: param_f64(params, "min_opacity", d.min_opacity),
            max_opacity: param_f64(params, "max_opacity", d.max_opacity),
            interaction_radius: param_f64(params, "interaction_radius", d.interaction_radius),
            pointer_strength: param_f64(params, "pointer_strength", d.pointer_strength),
        }
    }

    /// Like [`FieldParams::from_json`] but rejects keys that hold a non-number
    /// and an `area_per_particle` that is not finite and positive.
    ///
    /// Unknown keys are ignored with a warning.
    pub fn try_from_json(params: &Value) -> Result<Self, FieldError> {
        for key in KEYS {
            checked_f64(params, key)?;
        }
        if let Some(obj) = params.as_object() {
            for key in obj.keys().filter(|k| !KEYS.contains(&k.as_str())) {
                log::warn!("ignoring unknown field parameter '{key}'");
            }
        }
        let parsed = Self::from_json(params);
        if !is_positive(parsed.area_per_particle) {
            return Err(FieldError::InvalidParam {
                name: "area_per_particle".into(),
                value: parsed.area_per_particle,
            });
        }
        Ok(parsed)
    }

    /// Current parameter values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "area_per_particle": self.area_per_particle,
            "max_speed": self.max_speed,
            "min_radius": self.min_radius,
            "max_radius": self.max_radius,
            "min_opacity": self.min_opacity,
            "max_opacity": self.max_opacity,
            "interaction_radius": self.interaction_radius,
            "pointer_strength": self.pointer_strength,
        })
    }

    /// Schema describing every parameter: type, default, range and meaning.
    pub fn schema() -> Value {
        json!({
            "area_per_particle": {
                "type": "number",
                "default": DEFAULT_AREA_PER_PARTICLE,
                "min": 100.0,
                "max": 100000.0,
                "description": "Viewport area per particle; count = floor(width * height / area)"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "max": 5.0,
                "description": "Velocity components are drawn from [-max_speed, max_speed]"
            },
            "min_radius": {
                "type": "number",
                "default": DEFAULT_MIN_RADIUS,
                "min": 0.1,
                "max": 10.0,
                "description": "Smallest particle radius"
            },
            "max_radius": {
                "type": "number",
                "default": DEFAULT_MAX_RADIUS,
                "min": 0.1,
                "max": 10.0,
                "description": "Largest particle radius"
            },
            "min_opacity": {
                "type": "number",
                "default": DEFAULT_MIN_OPACITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Most transparent particle alpha"
            },
            "max_opacity": {
                "type": "number",
                "default": DEFAULT_MAX_OPACITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Most opaque particle alpha"
            },
            "interaction_radius": {
                "type": "number",
                "default": DEFAULT_INTERACTION_RADIUS,
                "min": 0.0,
                "max": 1000.0,
                "description": "Pointer influence radius"
            },
            "pointer_strength": {
                "type": "number",
                "default": DEFAULT_POINTER_STRENGTH,
                "min": 0.0,
                "max": 1.0,
                "description": "Damping applied to the pointer displacement per tick"
            }
        })
    }

    /// Number of particles for a viewport of the given extents, at most
    /// [`MAX_PARTICLES`].
    ///
    /// Zero, negative or non-finite extents give zero, as does an
    /// `area_per_particle` that is not finite and positive.
    pub fn particle_count(&self, width: f64, height: f64) -> usize {
        if !is_positive(width) || !is_positive(height) || !is_positive(self.area_per_particle) {
            return 0;
        }
        let count = (width * height / self.area_per_particle).floor();
        if count > MAX_PARTICLES as f64 {
            log::warn!("{width}x{height} viewport capped at {MAX_PARTICLES} particles");
            return MAX_PARTICLES;
        }
        count as usize
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
