//! Recommendation Selection
//!
//! Cleans and de-duplicates per-category tip candidates supplied by an
//! upstream tip source. The selector does not rank tips or decide which
//! candidates to request; it owns only the cleaning pass and the
//! categorized container shape. Tip sources are free to key their pools
//! to the categories where emissions are highest.

use crate::activity::{Category, EmissionResult};
use crate::error::EngineError;
use crate::factors::CleaningRules;
use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw tip candidates, one pool per category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TipCandidates {
    pub travel: Vec<String>,
    pub energy: Vec<String>,
    pub food: Vec<String>,
    pub shopping: Vec<String>,
}

impl TipCandidates {
    /// Build candidates from a loose JSON value.
    ///
    /// The value must be an object mapping category names to arrays of
    /// strings. Unknown keys are ignored and missing categories stay
    /// empty; any other shape is a contract violation.
    pub fn from_value(value: serde_json::Value) -> std::result::Result<Self, EngineError> {
        let serde_json::Value::Object(map) = value else {
            return Err(EngineError::InvalidInput(
                "candidates must be an object mapping categories to tip lists".to_string(),
            ));
        };

        let mut candidates = Self::default();
        for (key, entry) in map {
            let Some(category) = Category::from_name(&key) else {
                continue;
            };

            let serde_json::Value::Array(items) = entry else {
                return Err(EngineError::InvalidInput(format!(
                    "category '{}' must be a list of tips",
                    key
                )));
            };

            let mut pool = Vec::with_capacity(items.len());
            for item in items {
                let serde_json::Value::String(tip) = item else {
                    return Err(EngineError::InvalidInput(format!(
                        "category '{}' contains a non-string tip",
                        key
                    )));
                };
                pool.push(tip);
            }

            *candidates.pool_mut(category) = pool;
        }

        Ok(candidates)
    }

    /// Candidate pool for one category.
    pub fn pool(&self, category: Category) -> &[String] {
        match category {
            Category::Travel => &self.travel,
            Category::Energy => &self.energy,
            Category::Food => &self.food,
            Category::Shopping => &self.shopping,
        }
    }

    fn pool_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Travel => &mut self.travel,
            Category::Energy => &mut self.energy,
            Category::Food => &mut self.food,
            Category::Shopping => &mut self.shopping,
        }
    }
}

/// Cleaned, categorized recommendations.
///
/// Invariants: no tip is empty, shorter than the configured minimum after
/// trimming, or contains a colon; first-seen order is preserved and exact
/// duplicates are removed per category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RecommendationBundle {
    pub travel: Vec<String>,
    pub energy: Vec<String>,
    pub food: Vec<String>,
    pub shopping: Vec<String>,
}

impl RecommendationBundle {
    /// Tips for one category.
    pub fn slot(&self, category: Category) -> &[String] {
        match category {
            Category::Travel => &self.travel,
            Category::Energy => &self.energy,
            Category::Food => &self.food,
            Category::Shopping => &self.shopping,
        }
    }
}

/// Clean and de-duplicate candidates into a recommendation bundle.
///
/// Each category is processed independently; a category that ends up empty
/// after filtering is valid, not an error. The pass is idempotent: feeding
/// a bundle's own output back through yields the same bundle.
pub fn select(candidates: &TipCandidates, rules: &CleaningRules) -> RecommendationBundle {
    RecommendationBundle {
        travel: clean_pool(&candidates.travel, rules),
        energy: clean_pool(&candidates.energy, rules),
        food: clean_pool(&candidates.food, rules),
        shopping: clean_pool(&candidates.shopping, rules),
    }
}

/// Trim each tip, drop degenerate entries, and de-duplicate keeping the
/// first occurrence.
///
/// Colon-containing strings are orphaned section headers leaking from the
/// tip source (for example `"Travel:"`), not real advice.
fn clean_pool(raw: &[String], rules: &CleaningRules) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut tips = Vec::new();

    for tip in raw {
        let tip = tip.trim();
        if tip.is_empty() || tip.chars().count() < rules.min_tip_length || tip.contains(':') {
            continue;
        }
        if seen.insert(tip.to_string()) {
            tips.push(tip.to_string());
        }
    }

    tips
}

/// Supplies raw tip candidates for an emission profile.
///
/// Implementations own candidate generation and ranking; the selector only
/// cleans whatever they return.
pub trait TipSource: Send + Sync {
    fn candidates(&self, emissions: &EmissionResult) -> TipCandidates;
}

/// File-backed tip pool that returns the same candidates for every profile.
#[derive(Debug, Clone)]
pub struct StaticTipSource {
    pool: TipCandidates,
}

impl StaticTipSource {
    pub fn new(pool: TipCandidates) -> Self {
        Self { pool }
    }

    /// Load a category → tips table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tip pool file: {:?}", path))?;

        let pool: TipCandidates =
            serde_json::from_str(&contents).with_context(|| "Failed to parse tip pool JSON")?;

        Ok(Self::new(pool))
    }
}

impl Default for StaticTipSource {
    fn default() -> Self {
        Self::new(TipCandidates {
            travel: vec![
                "Use public transport for regular commutes".to_string(),
                "Carpool with neighbours or colleagues on longer trips".to_string(),
                "Choose trains over short-haul flights".to_string(),
                "Walk or cycle journeys under five kilometres".to_string(),
            ],
            energy: vec![
                "Switch to LED bulbs".to_string(),
                "Unplug chargers and standby appliances".to_string(),
                "Run the washing machine on a cold cycle".to_string(),
                "Lower the thermostat by one degree".to_string(),
            ],
            food: vec![
                "Swap one meat meal a week for a plant-based one".to_string(),
                "Buy seasonal local produce".to_string(),
                "Plan meals ahead to cut food waste".to_string(),
            ],
            shopping: vec![
                "Repair before replacing".to_string(),
                "Buy second-hand where you can".to_string(),
                "Skip fast-fashion impulse purchases".to_string(),
            ],
        })
    }
}

impl TipSource for StaticTipSource {
    fn candidates(&self, _emissions: &EmissionResult) -> TipCandidates {
        self.pool.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_filters_and_dedups_travel_pool() {
        let candidates = TipCandidates {
            travel: strings(&["Use the bus", "Use the bus", "Travel:", "", "ok"]),
            ..TipCandidates::default()
        };

        let bundle = select(&candidates, &CleaningRules::default());

        assert_eq!(bundle.travel, strings(&["Use the bus"]));
        assert!(bundle.energy.is_empty());
    }

    #[test]
    fn test_select_trims_whitespace() {
        let candidates = TipCandidates {
            energy: strings(&[" Switch to LED bulbs "]),
            ..TipCandidates::default()
        };

        let bundle = select(&candidates, &CleaningRules::default());

        assert_eq!(bundle.energy, strings(&["Switch to LED bulbs"]));
    }

    #[test]
    fn test_select_preserves_first_seen_order() {
        let candidates = TipCandidates {
            food: strings(&["Eat local", "Waste less", "Eat local", "Eat seasonal"]),
            ..TipCandidates::default()
        };

        let bundle = select(&candidates, &CleaningRules::default());

        assert_eq!(
            bundle.food,
            strings(&["Eat local", "Waste less", "Eat seasonal"])
        );
    }

    #[test]
    fn test_select_is_case_sensitive_exact_dedup() {
        let candidates = TipCandidates {
            shopping: strings(&["Buy less", "buy less"]),
            ..TipCandidates::default()
        };

        let bundle = select(&candidates, &CleaningRules::default());

        assert_eq!(bundle.shopping, strings(&["Buy less", "buy less"]));
    }

    #[test]
    fn test_select_drops_colon_headers_anywhere_in_tip() {
        let candidates = TipCandidates {
            travel: strings(&["Travel:", "Tip: take the bus", "Take the bus"]),
            ..TipCandidates::default()
        };

        let bundle = select(&candidates, &CleaningRules::default());

        assert_eq!(bundle.travel, strings(&["Take the bus"]));
    }

    #[test]
    fn test_select_respects_min_tip_length() {
        let rules = CleaningRules { min_tip_length: 10 };
        let candidates = TipCandidates {
            energy: strings(&["Short tip", "Long enough tip"]),
            ..TipCandidates::default()
        };

        let bundle = select(&candidates, &rules);

        assert_eq!(bundle.energy, strings(&["Long enough tip"]));
    }

    #[test]
    fn test_select_is_idempotent() {
        let candidates = TipCandidates {
            travel: strings(&["  Use the bus ", "Use the bus", "x", "Travel:"]),
            energy: strings(&["Switch to LED bulbs"]),
            food: strings(&["", "Plan meals"]),
            shopping: strings(&["Repair first", "Repair first"]),
        };
        let rules = CleaningRules::default();

        let once = select(&candidates, &rules);
        let again = select(
            &TipCandidates {
                travel: once.travel.clone(),
                energy: once.energy.clone(),
                food: once.food.clone(),
                shopping: once.shopping.clone(),
            },
            &rules,
        );

        assert_eq!(once, again);
    }

    #[test]
    fn test_empty_category_is_valid() {
        let bundle = select(&TipCandidates::default(), &CleaningRules::default());

        for category in Category::ALL {
            assert!(bundle.slot(category).is_empty());
        }
    }

    #[test]
    fn test_from_value_accepts_category_mapping() {
        let candidates = TipCandidates::from_value(json!({
            "travel": ["Use the bus"],
            "energy": [],
        }))
        .unwrap();

        assert_eq!(candidates.travel, strings(&["Use the bus"]));
        assert!(candidates.energy.is_empty());
        assert!(candidates.food.is_empty());
    }

    #[test]
    fn test_from_value_ignores_unknown_keys() {
        let candidates = TipCandidates::from_value(json!({
            "travel": ["Use the bus"],
            "commentary": ["not a category"],
        }))
        .unwrap();

        assert_eq!(candidates.travel, strings(&["Use the bus"]));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(matches!(
            TipCandidates::from_value(json!(["Use the bus"])),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_value_rejects_non_list_category() {
        assert!(matches!(
            TipCandidates::from_value(json!({"travel": 5})),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_value_rejects_non_string_tip() {
        assert!(matches!(
            TipCandidates::from_value(json!({"travel": ["Use the bus", 5]})),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_static_source_returns_pool_for_any_profile() {
        let source = StaticTipSource::default();
        let zero = EmissionResult::from_categories(0.0, 0.0, 0.0, 0.0);
        let heavy = EmissionResult::from_categories(500.0, 10.0, 30.0, 2.0);

        assert_eq!(source.candidates(&zero), source.candidates(&heavy));
    }

    #[test]
    fn test_default_pool_survives_cleaning_unchanged() {
        let source = StaticTipSource::default();
        let zero = EmissionResult::from_categories(0.0, 0.0, 0.0, 0.0);
        let candidates = source.candidates(&zero);

        let bundle = select(&candidates, &CleaningRules::default());

        for category in Category::ALL {
            assert_eq!(bundle.slot(category), candidates.pool(category));
        }
    }
}
