//! Activity Inputs and Emission Results
//!
//! The shared data model: one evaluation's raw activity record and the
//! per-category estimate derived from it. Wire field names follow the
//! calculator client contract (`travelType`, `distance`, `electricity`,
//! `food`, `shopping`).

use serde::{Deserialize, Deserializer, Serialize};

/// Travel mode for the travel category.
///
/// `Bike` and `Walk` are zero-emission. Unrecognized wire strings map to
/// `Other`, which is priced with the configured default factor, so a stray
/// mode never fails a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Car,
    Bus,
    Train,
    Flight,
    Bike,
    Walk,
    Other,
}

impl TravelMode {
    /// Parse a wire string, case-insensitively. Unknown modes become `Other`.
    pub fn parse(mode: &str) -> Self {
        match mode.to_ascii_lowercase().as_str() {
            "car" => Self::Car,
            "bus" => Self::Bus,
            "train" => Self::Train,
            "flight" => Self::Flight,
            "bike" => Self::Bike,
            "walk" => Self::Walk,
            _ => Self::Other,
        }
    }
}

impl<'de> Deserialize<'de> for TravelMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mode = String::deserialize(deserializer)?;
        Ok(Self::parse(&mode))
    }
}

/// One evaluation's raw inputs.
///
/// Numeric fields default to 0 when absent; the estimator clamps them to
/// `>= 0` before use, so partial or out-of-range input is never an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityInput {
    #[serde(rename = "travelType", default)]
    pub travel_mode: TravelMode,

    /// Distance travelled (km)
    #[serde(rename = "distance", default)]
    pub distance_km: f64,

    /// Electricity used (kWh)
    #[serde(rename = "electricity", default)]
    pub electricity_kwh: f64,

    /// Meat/dairy consumed (kg)
    #[serde(rename = "food", default)]
    pub food_kg: f64,

    /// Shopping spend (currency units)
    #[serde(rename = "shopping", default)]
    pub shopping_spend: f64,
}

/// One of the four tracked impact domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Travel,
    Energy,
    Food,
    Shopping,
}

impl Category {
    /// All categories, in the order the client renders them.
    pub const ALL: [Category; 4] = [
        Category::Travel,
        Category::Energy,
        Category::Food,
        Category::Shopping,
    ];

    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Travel => "travel",
            Category::Energy => "energy",
            Category::Food => "food",
            Category::Shopping => "shopping",
        }
    }

    /// Look up a category by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "travel" => Some(Category::Travel),
            "energy" => Some(Category::Energy),
            "food" => Some(Category::Food),
            "shopping" => Some(Category::Shopping),
            _ => None,
        }
    }
}

/// Per-category emission estimate (kg CO₂e), immutable once produced.
///
/// `total_emission` is always recomputed from the four categories by
/// [`EmissionResult::from_categories`]; there is no way to supply it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionResult {
    pub travel_emission: f64,
    pub energy_emission: f64,
    pub food_emission: f64,
    pub shopping_emission: f64,
    pub total_emission: f64,
}

impl EmissionResult {
    /// Build a result from the four category emissions.
    ///
    /// Each category is clamped to `>= 0` (non-finite values become 0) and
    /// the total is the sum of the clamped categories.
    pub fn from_categories(travel: f64, energy: f64, food: f64, shopping: f64) -> Self {
        let travel = clamp_non_negative(travel);
        let energy = clamp_non_negative(energy);
        let food = clamp_non_negative(food);
        let shopping = clamp_non_negative(shopping);

        Self {
            travel_emission: travel,
            energy_emission: energy,
            food_emission: food,
            shopping_emission: shopping,
            total_emission: travel + energy + food + shopping,
        }
    }

    /// Emission for a single category.
    pub fn category(&self, category: Category) -> f64 {
        match category {
            Category::Travel => self.travel_emission,
            Category::Energy => self.energy_emission,
            Category::Food => self.food_emission,
            Category::Shopping => self.shopping_emission,
        }
    }
}

/// Values outside `[0, +inf)` contribute nothing.
pub(crate) fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
