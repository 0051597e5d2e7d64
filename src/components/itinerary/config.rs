//! Runtime-tunable planner settings.
//!
//! Defaults mirror the constants table. A page may override them with a JSON
//! block, e.g. `{"zoom_max": 2.0, "seed": 7}`; omitted keys keep their default.

use serde::Deserialize;

use super::constants::{DANGER_ZONE_PADDING, ZOOM_MAX, ZOOM_MIN, ZOOM_SENSITIVITY};
use super::error::PlannerError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
	/// Screen-pixel band along the container edge that arms card deletion.
	pub danger_zone_padding: f64,
	pub zoom_min: f64,
	pub zoom_max: f64,
	/// Scale change per wheel delta unit.
	pub zoom_sensitivity: f64,
	/// Fixed RNG seed for placement and generic data. Clock-seeded when absent.
	pub seed: Option<u64>,
}

impl Default for PlannerConfig {
	fn default() -> Self {
		Self {
			danger_zone_padding: DANGER_ZONE_PADDING,
			zoom_min: ZOOM_MIN,
			zoom_max: ZOOM_MAX,
			zoom_sensitivity: ZOOM_SENSITIVITY,
			seed: None,
		}
	}
}

impl PlannerConfig {
	pub fn from_json(raw: &str) -> Result<Self, PlannerError> {
		let config: Self =
			serde_json::from_str(raw).map_err(|e| PlannerError::InvalidConfig(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), PlannerError> {
		let finite = [
			self.danger_zone_padding,
			self.zoom_min,
			self.zoom_max,
			self.zoom_sensitivity,
		]
		.iter()
		.all(|v| v.is_finite());
		if !finite {
			return Err(PlannerError::InvalidConfig("values must be finite".into()));
		}
		if self.zoom_min <= 0.0 || self.zoom_min > self.zoom_max {
			return Err(PlannerError::InvalidConfig(format!(
				"zoom range [{}, {}] is empty or not positive",
				self.zoom_min, self.zoom_max
			)));
		}
		if self.zoom_sensitivity <= 0.0 {
			return Err(PlannerError::InvalidConfig(
				"zoom_sensitivity must be positive".into(),
			));
		}
		if self.danger_zone_padding < 0.0 {
			return Err(PlannerError::InvalidConfig(
				"danger_zone_padding must not be negative".into(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config = PlannerConfig::from_json(r#"{"zoom_max": 2.0, "seed": 7}"#).unwrap();
		assert_eq!(config.zoom_max, 2.0);
		assert_eq!(config.seed, Some(7));
		assert_eq!(config.zoom_min, ZOOM_MIN);
		assert_eq!(config.danger_zone_padding, DANGER_ZONE_PADDING);
	}

	#[test]
	fn rejects_inverted_zoom_range() {
		let err = PlannerConfig::from_json(r#"{"zoom_min": 4.0}"#).unwrap_err();
		assert!(matches!(err, PlannerError::InvalidConfig(_)));
	}

	#[test]
	fn rejects_malformed_and_unknown_keys() {
		assert!(PlannerConfig::from_json("{").is_err());
		assert!(PlannerConfig::from_json(r#"{"zoom": 1.0}"#).is_err());
	}

	#[test]
	fn rejects_stalled_or_reversed_wheel() {
		for raw in [r#"{"zoom_sensitivity": 0.0}"#, r#"{"zoom_sensitivity": -0.001}"#] {
			assert!(matches!(
				PlannerConfig::from_json(raw),
				Err(PlannerError::InvalidConfig(_))
			));
		}
	}

	#[test]
	fn rejects_negative_padding_and_non_finite_values() {
		assert!(PlannerConfig::from_json(r#"{"danger_zone_padding": -1.0}"#).is_err());
		let config = PlannerConfig {
			zoom_max: f64::INFINITY,
			..PlannerConfig::default()
		};
		assert_eq!(
			config.validate(),
			Err(PlannerError::InvalidConfig("values must be finite".into()))
		);
		let config = PlannerConfig {
			danger_zone_padding: f64::NAN,
			..PlannerConfig::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn empty_object_is_default() {
		assert_eq!(PlannerConfig::from_json("{}").unwrap(), PlannerConfig::default());
	}
}
