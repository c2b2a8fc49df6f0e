//! Reproducible description of a headless particle-field run.
//!
//! A [`Seed`] captures everything needed to recreate a frame: viewport,
//! parameter overrides, PRNG seed, frame count, pointer and theme. Two
//! identical seeds produce bit-identical particle fields.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::FieldParams;
use crate::driver::Simulation;
use crate::error::FieldError;
use crate::theme::Theme;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: f64,
    pub height: f64,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
    /// Pointer held at this position for every frame, if any.
    #[serde(default)]
    pub pointer: Option<[f64; 2]>,
    #[serde(default)]
    pub theme: Theme,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Seed {
    /// Creates a seed with default params (`{}`), zero frames, no pointer
    /// and the default theme.
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            params: empty_params(),
            seed,
            frames: 0,
            pointer: None,
            theme: Theme::default(),
        }
    }

    /// Checks that the viewport is finite and positive and that the params
    /// object is well typed with a usable `area_per_particle`.
    pub fn validate(&self) -> Result<(), FieldError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.width) || !ok(self.height) {
            return Err(FieldError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        FieldParams::try_from_json(&self.params)?;
        Ok(())
    }

    /// Builds a sized simulation with pointer and theme applied, but no
    /// frames run yet.
    pub fn build(&self) -> Result<Simulation, FieldError> {
        self.validate()?;
        let params = FieldParams::try_from_json(&self.params)?;
        let mut sim = Simulation::new(params, self.seed);
        sim.resize(self.width, self.height);
        sim.set_hue(self.theme.particle_hue());
        if let Some([x, y]) = self.pointer {
            sim.pointer_moved(x, y);
        }
        Ok(sim)
    }

    pub fn pointer_position(&self) -> Option<DVec2> {
        self.pointer.map(DVec2::from_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_seed_with_defaults() {
        let s = Seed::new(1280.0, 720.0, 42);
        assert_eq!(s.seed, 42);
        assert_eq!(s.frames, 0);
        assert_eq!(s.params, serde_json::json!({}));
        assert!(s.pointer.is_none());
        assert_eq!(s.theme, Theme::Dark);
    }

    #[test]
    fn json_round_trip_with_everything_set() {
        let mut s = Seed::new(900.0, 900.0, 8675309);
        s.params = serde_json::json!({"interaction_radius": 140.0});
        s.frames = 600;
        s.pointer = Some([450.0, 300.0]);
        s.theme = Theme::Light;
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let s: Seed = serde_json::from_str(r#"{"width": 640, "height": 480, "seed": 3}"#).unwrap();
        assert_eq!(s, Seed::new(640.0, 480.0, 3));
    }

    #[test]
    fn theme_serializes_lowercase() {
        let mut s = Seed::new(10.0, 10.0, 1);
        s.theme = Theme::Light;
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["theme"], "light");
    }

    #[test]
    fn validate_rejects_degenerate_viewports() {
        for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0), (f64::INFINITY, 10.0)] {
            let s = Seed::new(w, h, 1);
            assert!(
                matches!(s.validate(), Err(FieldError::InvalidViewport { .. })),
                "{w}x{h} accepted"
            );
        }
    }

    #[test]
    fn validate_rejects_mistyped_params() {
        let mut s = Seed::new(10.0, 10.0, 1);
        s.params = serde_json::json!({"max_speed": "quick"});
        assert!(matches!(
            s.validate(),
            Err(FieldError::ParamTypeMismatch { .. })
        ));
    }

    #[test]
    fn build_rejects_non_positive_area_per_particle() {
        for area in [0.0, -9000.0] {
            let mut s = Seed::new(900.0, 900.0, 1);
            s.params = serde_json::json!({"area_per_particle": area});
            assert!(
                matches!(s.build(), Err(FieldError::InvalidParam { .. })),
                "area {area} accepted"
            );
        }
    }

    #[test]
    fn build_caps_enormous_viewport() {
        let s = Seed::new(1e200, 720.0, 1);
        let sim = s.build().unwrap();
        assert_eq!(sim.particles().len(), crate::config::MAX_PARTICLES);
    }

    #[test]
    fn build_applies_pointer_and_theme() {
        let mut s = Seed::new(900.0, 900.0, 42);
        s.pointer = Some([10.0, 20.0]);
        s.theme = Theme::Light;
        let sim = s.build().unwrap();
        assert_eq!(sim.particles().len(), 90);
        assert_eq!(sim.pointer().position(), s.pointer_position());
        assert_eq!(sim.hue(), Theme::Light.particle_hue());
    }

    #[test]
    fn identical_seeds_build_identical_fields() {
        let s = Seed::new(500.0, 400.0, 77);
        assert_eq!(s.build().unwrap().particles(), s.build().unwrap().particles());
    }
}
