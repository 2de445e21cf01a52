//! Tunable constants for the particle field.
//!
//! Every literal the animation depends on lives in [`FieldConfig`]. The
//! defaults reproduce the hero on the live site; a page can override any
//! subset of them through a JSON config element (see [`crate::load_config`]).
//!
//! # Units
//!
//! Distances are canvas pixels. Velocities are pixels per frame, since the
//! simulation advances one unit of time per animation frame.

use serde::Deserialize;
use thiserror::Error;

use super::theme::ThemeName;

/// Default number of particles.
pub const DEFAULT_PARTICLE_COUNT: usize = 60;
/// Default half-width of the initial velocity range.
pub const DEFAULT_INITIAL_SPEED: f64 = 0.25;
/// Default particle radius range.
pub const DEFAULT_RADIUS_RANGE: (f64, f64) = (1.0, 3.0);
/// Default particle opacity range.
pub const DEFAULT_OPACITY_RANGE: (f64, f64) = (0.2, 0.7);
/// Default distance within which the pointer pushes particles away.
pub const DEFAULT_REPULSION_RADIUS: f64 = 200.0;
/// Default impulse scale at zero distance from the pointer.
pub const DEFAULT_REPULSION_STRENGTH: f64 = 0.02;
/// Default maximum distance for a connection line.
pub const DEFAULT_CONNECTION_DISTANCE: f64 = 150.0;
/// Default alpha of a connection line between coincident particles.
pub const DEFAULT_LINK_OPACITY: f64 = 0.15;

/// Upper bound on the particle count. The link pass is quadratic.
pub const MAX_PARTICLE_COUNT: usize = 1000;

/// Reasons a [`FieldConfig`] is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	#[error("particle_count {0} exceeds the maximum of {max}", max = MAX_PARTICLE_COUNT)]
	TooManyParticles(usize),
	#[error("{field} must be a finite, non-negative number (got {value})")]
	InvalidValue { field: &'static str, value: f64 },
	#[error("{field} range is inverted: min {min} > max {max}")]
	InvertedRange {
		field: &'static str,
		min: f64,
		max: f64,
	},
	#[error("{field} must lie within [0, 1] (got {value})")]
	OpacityOutOfRange { field: &'static str, value: f64 },
	#[error("malformed config: {0}")]
	Parse(String),
}

/// Simulation and drawing parameters for a particle field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of particles, fixed for the lifetime of the animation.
	pub particle_count: usize,
	/// Velocity components are sampled from `[-initial_speed, initial_speed)`.
	pub initial_speed: f64,
	pub radius_min: f64,
	pub radius_max: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Pointer influence radius (R).
	pub repulsion_radius: f64,
	/// Impulse applied at zero distance; falls off linearly to zero at R.
	pub repulsion_strength: f64,
	/// Connection threshold (C).
	pub connection_distance: f64,
	/// Line alpha at zero distance; falls off linearly to zero at C.
	pub link_opacity: f64,
	/// Colour preset.
	pub theme: ThemeName,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			particle_count: DEFAULT_PARTICLE_COUNT,
			initial_speed: DEFAULT_INITIAL_SPEED,
			radius_min: DEFAULT_RADIUS_RANGE.0,
			radius_max: DEFAULT_RADIUS_RANGE.1,
			opacity_min: DEFAULT_OPACITY_RANGE.0,
			opacity_max: DEFAULT_OPACITY_RANGE.1,
			repulsion_radius: DEFAULT_REPULSION_RADIUS,
			repulsion_strength: DEFAULT_REPULSION_STRENGTH,
			connection_distance: DEFAULT_CONNECTION_DISTANCE,
			link_opacity: DEFAULT_LINK_OPACITY,
			theme: ThemeName::default(),
		}
	}
}

impl FieldConfig {
	/// Parse a JSON object. Absent fields keep their defaults.
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		let config: Self =
			serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
		config.validate()
	}

	/// Check every field, returning the config unchanged when it is usable.
	pub fn validate(self) -> Result<Self, ConfigError> {
		if self.particle_count > MAX_PARTICLE_COUNT {
			return Err(ConfigError::TooManyParticles(self.particle_count));
		}

		for (field, value) in [
			("initial_speed", self.initial_speed),
			("radius_min", self.radius_min),
			("radius_max", self.radius_max),
			("repulsion_radius", self.repulsion_radius),
			("repulsion_strength", self.repulsion_strength),
			("connection_distance", self.connection_distance),
			("link_opacity", self.link_opacity),
		] {
			if !value.is_finite() || value < 0.0 {
				return Err(ConfigError::InvalidValue { field, value });
			}
		}

		for (field, value) in [
			("opacity_min", self.opacity_min),
			("opacity_max", self.opacity_max),
		] {
			if !(0.0..=1.0).contains(&value) {
				return Err(ConfigError::OpacityOutOfRange { field, value });
			}
		}

		for (field, min, max) in [
			("radius", self.radius_min, self.radius_max),
			("opacity", self.opacity_min, self.opacity_max),
		] {
			if min > max {
				return Err(ConfigError::InvertedRange { field, min, max });
			}
		}

		Ok(self)
	}
}
