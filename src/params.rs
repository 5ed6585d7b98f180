//! Tunable parameters for the aurora and stardust simulators.
//!
//! The two flat records here are the only configuration the simulation reads.
//! Any change to them rebuilds the whole scene; there is no incremental
//! reconfiguration of live entities.
//!
//! Parameter sets round-trip through JSON so a tuned look can be captured
//! from the console and loaded back at startup:
//!
//! ```ignore
//! let params = ParamSet::load("tuned.json")?;
//! Backdrop::new().with_params(params).run()?;
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParamError};

/// Largest accepted `aurora.num_layers`.
pub const MAX_LAYERS: u32 = 64;

/// Largest accepted `stardust.num_particles`.
pub const MAX_PARTICLES: u32 = 10_000;

/// Parameters for the glow layers of the aurora field.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuroraParams {
    /// Number of glow layers.
    pub num_layers: u32,
    /// Scale of the per-tick drift velocity.
    pub speed_multiplier: f32,
    /// Base phase advance per tick for the radius pulse.
    pub pulse_speed: f32,
    /// Smallest base radius in pixels.
    pub radius_min: f32,
    /// Largest base radius in pixels.
    pub radius_max: f32,
    /// Pointer distance inside which layers are pushed away.
    pub mouse_repel_distance: f32,
    /// Strength of the pointer push.
    pub mouse_repel_force: f32,
    /// Peak alpha of the brightest palette entry.
    pub opacity: f32,
    /// Parallax factor applied to the scroll offset.
    pub scroll_speed: f32,
}

impl Default for AuroraParams {
    fn default() -> Self {
        Self {
            num_layers: 12,
            speed_multiplier: 0.5,
            pulse_speed: 0.001,
            radius_min: 200.0,
            radius_max: 500.0,
            mouse_repel_distance: 300.0,
            mouse_repel_force: 0.05,
            opacity: 0.15,
            scroll_speed: 0.3,
        }
    }
}

/// Parameters for the stardust particles.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StardustParams {
    /// Number of particles.
    pub num_particles: u32,
    /// Scale of the fixed drift velocity.
    pub speed_multiplier: f32,
    /// Smallest particle radius in pixels.
    pub size_min: f32,
    /// Largest particle radius in pixels.
    pub size_max: f32,
    /// Pointer distance inside which particles receive an impulse.
    pub mouse_repel_distance: f32,
    /// Strength of the pointer impulse.
    pub mouse_repel_force: f32,
    /// Per-tick multiplier on the dynamic velocity, in (0, 1).
    pub friction: f32,
    /// Lowest base opacity.
    pub opacity_min: f32,
    /// Highest base opacity.
    pub opacity_max: f32,
    /// Parallax factor applied to the scroll offset.
    pub scroll_speed: f32,
}

impl Default for StardustParams {
    fn default() -> Self {
        Self {
            num_particles: 40,
            speed_multiplier: 0.16,
            size_min: 1.1,
            size_max: 2.5,
            mouse_repel_distance: 40.0,
            mouse_repel_force: 0.005,
            friction: 0.999,
            opacity_min: 0.5,
            opacity_max: 0.8,
            scroll_speed: 0.05,
        }
    }
}

/// Both parameter records, as edited by the console and exported as JSON.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParamSet {
    pub aurora: AuroraParams,
    pub stardust: StardustParams,
}

fn finite(field: &'static str, value: f32) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NotFinite { field })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ParamError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ParamError::Negative { field, value });
    }
    Ok(())
}

fn ordered(
    min_field: &'static str,
    min: f32,
    max_field: &'static str,
    max: f32,
) -> Result<(), ParamError> {
    non_negative(min_field, min)?;
    non_negative(max_field, max)?;
    if min > max {
        return Err(ParamError::InvertedRange { min_field, max_field, min, max });
    }
    Ok(())
}

fn at_most_one(field: &'static str, value: f32) -> Result<(), ParamError> {
    if value > 1.0 {
        return Err(ParamError::OutOfRange { field, value, interval: "[0, 1]" });
    }
    Ok(())
}

fn count_at_most(field: &'static str, count: u32, max: u32) -> Result<(), ParamError> {
    if count > max {
        return Err(ParamError::TooMany { field, count, max });
    }
    Ok(())
}

impl AuroraParams {
    /// Check that these parameters describe a stable, drawable field.
    pub fn validate(&self) -> Result<(), ParamError> {
        count_at_most("aurora.num_layers", self.num_layers, MAX_LAYERS)?;
        non_negative("aurora.speed_multiplier", self.speed_multiplier)?;
        non_negative("aurora.pulse_speed", self.pulse_speed)?;
        ordered(
            "aurora.radius_min",
            self.radius_min,
            "aurora.radius_max",
            self.radius_max,
        )?;
        non_negative("aurora.mouse_repel_distance", self.mouse_repel_distance)?;
        non_negative("aurora.mouse_repel_force", self.mouse_repel_force)?;
        non_negative("aurora.opacity", self.opacity)?;
        at_most_one("aurora.opacity", self.opacity)?;
        non_negative("aurora.scroll_speed", self.scroll_speed)
    }
}

impl StardustParams {
    /// Check that these parameters describe a stable, drawable field.
    pub fn validate(&self) -> Result<(), ParamError> {
        count_at_most("stardust.num_particles", self.num_particles, MAX_PARTICLES)?;
        non_negative("stardust.speed_multiplier", self.speed_multiplier)?;
        ordered(
            "stardust.size_min",
            self.size_min,
            "stardust.size_max",
            self.size_max,
        )?;
        non_negative("stardust.mouse_repel_distance", self.mouse_repel_distance)?;
        non_negative("stardust.mouse_repel_force", self.mouse_repel_force)?;

        // Friction must strictly shrink the dynamic velocity.
        finite("stardust.friction", self.friction)?;
        if self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(ParamError::OutOfRange {
                field: "stardust.friction",
                value: self.friction,
                interval: "(0, 1)",
            });
        }

        ordered(
            "stardust.opacity_min",
            self.opacity_min,
            "stardust.opacity_max",
            self.opacity_max,
        )?;
        at_most_one("stardust.opacity_max", self.opacity_max)?;
        non_negative("stardust.scroll_speed", self.scroll_speed)
    }
}

impl ParamSet {
    /// Validate both records.
    pub fn validate(&self) -> Result<(), ParamError> {
        self.aurora.validate()?;
        self.stardust.validate()
    }

    /// Read a single tunable value.
    pub fn get(&self, key: ParamKey) -> f32 {
        let a = &self.aurora;
        let s = &self.stardust;
        match key {
            ParamKey::AuroraLayers => a.num_layers as f32,
            ParamKey::AuroraSpeed => a.speed_multiplier,
            ParamKey::AuroraPulseSpeed => a.pulse_speed,
            ParamKey::AuroraOpacity => a.opacity,
            ParamKey::AuroraRadiusMin => a.radius_min,
            ParamKey::AuroraRadiusMax => a.radius_max,
            ParamKey::AuroraRepelDistance => a.mouse_repel_distance,
            ParamKey::AuroraRepelForce => a.mouse_repel_force,
            ParamKey::AuroraScrollSpeed => a.scroll_speed,
            ParamKey::StardustParticles => s.num_particles as f32,
            ParamKey::StardustSpeed => s.speed_multiplier,
            ParamKey::StardustSizeMin => s.size_min,
            ParamKey::StardustSizeMax => s.size_max,
            ParamKey::StardustRepelDistance => s.mouse_repel_distance,
            ParamKey::StardustRepelForce => s.mouse_repel_force,
            ParamKey::StardustFriction => s.friction,
            ParamKey::StardustOpacityMin => s.opacity_min,
            ParamKey::StardustOpacityMax => s.opacity_max,
            ParamKey::StardustScrollSpeed => s.scroll_speed,
        }
    }

    /// Write a single tunable value. Counts are rounded to the nearest
    /// whole number and negative counts become zero.
    pub fn set(&mut self, key: ParamKey, value: f32) {
        let count = value.round().max(0.0) as u32;
        let a = &mut self.aurora;
        let s = &mut self.stardust;
        match key {
            ParamKey::AuroraLayers => a.num_layers = count,
            ParamKey::AuroraSpeed => a.speed_multiplier = value,
            ParamKey::AuroraPulseSpeed => a.pulse_speed = value,
            ParamKey::AuroraOpacity => a.opacity = value,
            ParamKey::AuroraRadiusMin => a.radius_min = value,
            ParamKey::AuroraRadiusMax => a.radius_max = value,
            ParamKey::AuroraRepelDistance => a.mouse_repel_distance = value,
            ParamKey::AuroraRepelForce => a.mouse_repel_force = value,
            ParamKey::AuroraScrollSpeed => a.scroll_speed = value,
            ParamKey::StardustParticles => s.num_particles = count,
            ParamKey::StardustSpeed => s.speed_multiplier = value,
            ParamKey::StardustSizeMin => s.size_min = value,
            ParamKey::StardustSizeMax => s.size_max = value,
            ParamKey::StardustRepelDistance => s.mouse_repel_distance = value,
            ParamKey::StardustRepelForce => s.mouse_repel_force = value,
            ParamKey::StardustFriction => s.friction = value,
            ParamKey::StardustOpacityMin => s.opacity_min = value,
            ParamKey::StardustOpacityMax => s.opacity_max = value,
            ParamKey::StardustScrollSpeed => s.scroll_speed = value,
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a JSON parameter set. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: ParamSet = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Save the parameter set to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a parameter set from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Which simulator a parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamGroup {
    Aurora,
    Stardust,
}

impl ParamGroup {
    pub fn title(self) -> &'static str {
        match self {
            ParamGroup::Aurora => "Aurora",
            ParamGroup::Stardust => "Stardust",
        }
    }

    /// Keys of this group in console order.
    pub fn keys(self) -> &'static [ParamKey] {
        match self {
            ParamGroup::Aurora => &ParamKey::AURORA,
            ParamGroup::Stardust => &ParamKey::STARDUST,
        }
    }
}

/// Slider bounds for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp to the range and snap to the nearest step.
    pub fn quantize(&self, value: f32) -> f32 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

/// Identifies one tunable field across both parameter records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    AuroraLayers,
    AuroraSpeed,
    AuroraPulseSpeed,
    AuroraOpacity,
    AuroraRadiusMin,
    AuroraRadiusMax,
    AuroraRepelDistance,
    AuroraRepelForce,
    AuroraScrollSpeed,
    StardustParticles,
    StardustSpeed,
    StardustSizeMin,
    StardustSizeMax,
    StardustRepelDistance,
    StardustRepelForce,
    StardustFriction,
    StardustOpacityMin,
    StardustOpacityMax,
    StardustScrollSpeed,
}

/// Which end of a min/max pair a key is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

impl ParamKey {
    pub const AURORA: [ParamKey; 9] = [
        ParamKey::AuroraLayers,
        ParamKey::AuroraSpeed,
        ParamKey::AuroraPulseSpeed,
        ParamKey::AuroraOpacity,
        ParamKey::AuroraRadiusMin,
        ParamKey::AuroraRadiusMax,
        ParamKey::AuroraRepelDistance,
        ParamKey::AuroraRepelForce,
        ParamKey::AuroraScrollSpeed,
    ];

    pub const STARDUST: [ParamKey; 10] = [
        ParamKey::StardustParticles,
        ParamKey::StardustSpeed,
        ParamKey::StardustSizeMin,
        ParamKey::StardustSizeMax,
        ParamKey::StardustRepelDistance,
        ParamKey::StardustRepelForce,
        ParamKey::StardustFriction,
        ParamKey::StardustOpacityMin,
        ParamKey::StardustOpacityMax,
        ParamKey::StardustScrollSpeed,
    ];

    pub fn group(self) -> ParamGroup {
        if ParamKey::AURORA.contains(&self) {
            ParamGroup::Aurora
        } else {
            ParamGroup::Stardust
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamKey::AuroraLayers => "Layers",
            ParamKey::StardustParticles => "Particles",
            ParamKey::AuroraSpeed | ParamKey::StardustSpeed => "Speed",
            ParamKey::AuroraPulseSpeed => "Pulse Speed",
            ParamKey::AuroraOpacity => "Opacity",
            ParamKey::AuroraRadiusMin => "Radius Min",
            ParamKey::AuroraRadiusMax => "Radius Max",
            ParamKey::StardustSizeMin => "Size Min",
            ParamKey::StardustSizeMax => "Size Max",
            ParamKey::AuroraRepelDistance | ParamKey::StardustRepelDistance => {
                "Mouse Repel Distance"
            }
            ParamKey::AuroraRepelForce | ParamKey::StardustRepelForce => "Mouse Repel Force",
            ParamKey::StardustFriction => "Friction",
            ParamKey::StardustOpacityMin => "Opacity Min",
            ParamKey::StardustOpacityMax => "Opacity Max",
            ParamKey::AuroraScrollSpeed | ParamKey::StardustScrollSpeed => {
                "Parallax Scroll Speed"
            }
        }
    }

    pub fn slider(self) -> SliderRange {
        match self {
            ParamKey::AuroraLayers => SliderRange::new(1.0, 12.0, 1.0),
            ParamKey::AuroraSpeed => SliderRange::new(0.0, 0.5, 0.01),
            ParamKey::AuroraPulseSpeed => SliderRange::new(0.0, 0.005, 0.0001),
            ParamKey::AuroraOpacity => SliderRange::new(0.0, 0.5, 0.01),
            ParamKey::AuroraRadiusMin => SliderRange::new(50.0, 500.0, 10.0),
            ParamKey::AuroraRadiusMax => SliderRange::new(200.0, 1000.0, 10.0),
            ParamKey::AuroraRepelDistance => SliderRange::new(0.0, 500.0, 10.0),
            ParamKey::AuroraRepelForce => SliderRange::new(0.0, 2.0, 0.05),
            ParamKey::AuroraScrollSpeed => SliderRange::new(0.0, 1.0, 0.05),
            ParamKey::StardustParticles => SliderRange::new(0.0, 300.0, 10.0),
            ParamKey::StardustSpeed => SliderRange::new(0.0, 0.2, 0.005),
            ParamKey::StardustSizeMin => SliderRange::new(0.1, 3.0, 0.1),
            ParamKey::StardustSizeMax => SliderRange::new(0.5, 5.0, 0.1),
            ParamKey::StardustRepelDistance => SliderRange::new(0.0, 300.0, 10.0),
            ParamKey::StardustRepelForce => SliderRange::new(0.0, 0.2, 0.005),
            ParamKey::StardustFriction => SliderRange::new(0.9, 0.999, 0.001),
            ParamKey::StardustOpacityMin => SliderRange::new(0.0, 1.0, 0.05),
            ParamKey::StardustOpacityMax => SliderRange::new(0.0, 1.0, 0.05),
            ParamKey::StardustScrollSpeed => SliderRange::new(0.0, 1.0, 0.05),
        }
    }

    /// Decimal places shown next to the slider.
    pub fn decimals(self) -> usize {
        match self {
            ParamKey::AuroraLayers
            | ParamKey::StardustParticles
            | ParamKey::AuroraRadiusMin
            | ParamKey::AuroraRadiusMax
            | ParamKey::AuroraRepelDistance
            | ParamKey::StardustRepelDistance => 0,
            ParamKey::StardustSizeMin | ParamKey::StardustSizeMax => 1,
            ParamKey::AuroraSpeed | ParamKey::StardustSpeed => 3,
            ParamKey::StardustRepelForce | ParamKey::StardustFriction => 3,
            ParamKey::AuroraPulseSpeed => 4,
            _ => 2,
        }
    }

    /// The other end of a min/max pair, if this key is one.
    pub fn partner(self) -> Option<(ParamKey, Bound)> {
        match self {
            ParamKey::AuroraRadiusMin => Some((ParamKey::AuroraRadiusMax, Bound::Lower)),
            ParamKey::AuroraRadiusMax => Some((ParamKey::AuroraRadiusMin, Bound::Upper)),
            ParamKey::StardustSizeMin => Some((ParamKey::StardustSizeMax, Bound::Lower)),
            ParamKey::StardustSizeMax => Some((ParamKey::StardustSizeMin, Bound::Upper)),
            ParamKey::StardustOpacityMin => Some((ParamKey::StardustOpacityMax, Bound::Lower)),
            ParamKey::StardustOpacityMax => Some((ParamKey::StardustOpacityMin, Bound::Upper)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ParamSet::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_radius_rejected() {
        let mut params = ParamSet::default();
        params.aurora.radius_min = 600.0;
        params.aurora.radius_max = 300.0;

        match params.validate() {
            Err(ParamError::InvertedRange { min_field, .. }) => {
                assert_eq!(min_field, "aurora.radius_min");
            }
            other => panic!("expected inverted range, got {:?}", other),
        }
    }

    #[test]
    fn test_friction_must_be_below_one() {
        let mut params = ParamSet::default();
        params.stardust.friction = 1.0;
        assert!(params.validate().is_err());

        params.stardust.friction = 0.0;
        assert!(params.validate().is_err());

        params.stardust.friction = 0.95;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        let mut params = ParamSet::default();
        params.aurora.opacity = f32::NAN;
        assert_eq!(
            params.validate(),
            Err(ParamError::NotFinite { field: "aurora.opacity" })
        );
    }

    #[test]
    fn test_get_set_covers_every_key() {
        let mut params = ParamSet::default();
        for &key in ParamKey::AURORA.iter().chain(ParamKey::STARDUST.iter()) {
            let range = key.slider();
            params.set(key, range.max);
            assert_eq!(params.get(key), range.max, "{:?}", key);
        }
    }

    #[test]
    fn test_count_rounds() {
        let mut params = ParamSet::default();
        params.set(ParamKey::AuroraLayers, 2.6);
        assert_eq!(params.aurora.num_layers, 3);
        params.set(ParamKey::StardustParticles, -4.0);
        assert_eq!(params.stardust.num_particles, 0);
    }

    #[test]
    fn test_quantize_snaps_to_step() {
        let range = ParamKey::AuroraRadiusMin.slider();
        assert_eq!(range.quantize(203.0), 200.0);
        assert_eq!(range.quantize(10.0), 50.0);
        assert_eq!(range.quantize(9999.0), 500.0);
    }

    #[test]
    fn test_groups_partition_keys() {
        assert!(ParamKey::AURORA.iter().all(|k| k.group() == ParamGroup::Aurora));
        assert!(ParamKey::STARDUST.iter().all(|k| k.group() == ParamGroup::Stardust));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params = ParamSet::from_json(r#"{ "aurora": { "num_layers": 3 } }"#).unwrap();
        assert_eq!(params.aurora.num_layers, 3);
        assert_eq!(params.aurora.radius_max, 500.0);
        assert_eq!(params.stardust, StardustParams::default());
    }

    #[test]
    fn test_invalid_json_params_rejected() {
        let result = ParamSet::from_json(r#"{ "stardust": { "friction": 1.5 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_counts_rejected() {
        let result = ParamSet::from_json(r#"{ "stardust": { "num_particles": 4000000000 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(ParamError::TooMany {
                field: "stardust.num_particles",
                count: 4_000_000_000,
                max: MAX_PARTICLES,
            }))
        ));

        let result = ParamSet::from_json(r#"{ "aurora": { "num_layers": 65 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(ParamError::TooMany { field: "aurora.num_layers", .. }))
        ));

        let mut params = ParamSet::default();
        params.aurora.num_layers = MAX_LAYERS;
        params.stardust.num_particles = MAX_PARTICLES;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_slider_maxima_within_count_caps() {
        assert!(ParamKey::AuroraLayers.slider().max <= MAX_LAYERS as f32);
        assert!(ParamKey::StardustParticles.slider().max <= MAX_PARTICLES as f32);
    }
}
