//! Emission Factor and Cleaning Configuration
//!
//! Factors are named constants converting a quantity of activity (km, kWh,
//! kg, currency) into an estimated CO₂e mass. Both tables are injectable:
//! loadable from JSON files and swappable without touching the algorithms.
//!
//! The compiled-in defaults are placeholders, not authoritative science;
//! deployments are expected to override them via `FACTORS_PATH`.

use crate::activity::TravelMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Emission factors for all four categories (kg CO₂e per unit).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmissionFactors {
    /// Per km by car
    pub travel_car: f64,
    /// Per km by bus
    pub travel_bus: f64,
    /// Per km by train
    pub travel_train: f64,
    /// Per passenger-km by plane
    pub travel_flight: f64,
    /// Applied when the travel mode is unrecognized
    pub travel_default: f64,
    /// Per kWh of grid electricity
    pub grid: f64,
    /// Per kg of meat/dairy
    pub meat_dairy: f64,
    /// Per currency unit of shopping spend
    pub spend: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            travel_car: 0.192,
            travel_bus: 0.105,
            travel_train: 0.041,
            travel_flight: 0.255,
            travel_default: 0.192,
            grid: 0.475,
            meat_dairy: 12.0,
            spend: 0.5,
        }
    }
}

impl EmissionFactors {
    /// Load factors from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read emission factors file: {:?}", path))?;

        serde_json::from_str(&contents).with_context(|| "Failed to parse emission factors JSON")
    }

    /// Per-km factor for a travel mode. Zero-emission modes yield 0.
    pub fn travel_factor(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Car => self.travel_car,
            TravelMode::Bus => self.travel_bus,
            TravelMode::Train => self.travel_train,
            TravelMode::Flight => self.travel_flight,
            TravelMode::Bike | TravelMode::Walk => 0.0,
            TravelMode::Other => self.travel_default,
        }
    }
}

/// Thresholds for the recommendation cleaning pass.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CleaningRules {
    /// Minimum tip length, in characters, after trimming
    pub min_tip_length: usize,
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self { min_tip_length: 3 }
    }
}

impl CleaningRules {
    /// Load rules from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cleaning rules file: {:?}", path))?;

        serde_json::from_str(&contents).with_context(|| "Failed to parse cleaning rules JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_travel_factor_by_mode() {
        let factors = EmissionFactors::default();

        assert_relative_eq!(factors.travel_factor(TravelMode::Car), 0.192);
        assert_relative_eq!(factors.travel_factor(TravelMode::Bus), 0.105);
        assert_relative_eq!(factors.travel_factor(TravelMode::Train), 0.041);
        assert_relative_eq!(factors.travel_factor(TravelMode::Flight), 0.255);
    }

    #[test]
    fn test_zero_emission_modes() {
        let factors = EmissionFactors::default();

        assert_eq!(factors.travel_factor(TravelMode::Bike), 0.0);
        assert_eq!(factors.travel_factor(TravelMode::Walk), 0.0);
    }

    #[test]
    fn test_unknown_mode_uses_default_factor() {
        let factors = EmissionFactors {
            travel_default: 0.3,
            ..EmissionFactors::default()
        };

        assert_relative_eq!(factors.travel_factor(TravelMode::Other), 0.3);
    }

    #[test]
    fn test_factors_partial_json_keeps_defaults() {
        let factors: EmissionFactors =
            serde_json::from_str(r#"{"travel_car": 0.2, "grid": 0.5}"#).unwrap();

        assert_relative_eq!(factors.travel_car, 0.2);
        assert_relative_eq!(factors.grid, 0.5);
        assert_relative_eq!(factors.travel_bus, 0.105);
        assert_relative_eq!(factors.spend, 0.5);
    }

    #[test]
    fn test_cleaning_rules_default() {
        assert_eq!(CleaningRules::default().min_tip_length, 3);
    }

    #[test]
    fn test_cleaning_rules_from_json() {
        let rules: CleaningRules = serde_json::from_str(r#"{"min_tip_length": 5}"#).unwrap();
        assert_eq!(rules.min_tip_length, 5);
    }
}
