//! Emission Estimation
//!
//! Deterministic, stateless conversion of an activity record into a
//! per-category CO₂e estimate. Each category is a linear multiply of
//! clamped quantity × factor, so the estimator is total over its inputs
//! and never fails. All-zero input yields a valid all-zero result.

use crate::activity::{clamp_non_negative, ActivityInput, EmissionResult};
use crate::factors::EmissionFactors;

/// Estimate per-category and total emissions for one activity record.
///
/// Quantities are clamped to `>= 0` before multiplication; the total is
/// always recomputed as the sum of the four categories.
pub fn estimate(input: &ActivityInput, factors: &EmissionFactors) -> EmissionResult {
    let travel = clamp_non_negative(input.distance_km) * factors.travel_factor(input.travel_mode);
    let energy = clamp_non_negative(input.electricity_kwh) * factors.grid;
    let food = clamp_non_negative(input.food_kg) * factors.meat_dairy;
    let shopping = clamp_non_negative(input.shopping_spend) * factors.spend;

    EmissionResult::from_categories(travel, energy, food, shopping)
}
