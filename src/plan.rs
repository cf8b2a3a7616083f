//! Wellness plan data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Number of entries a weekly plan must carry.
pub const WEEKLY_PLAN_DAYS: usize = 7;

/// One day of the weekly plan. Order within the week is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    pub day: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snack: String,
    pub exercise: String,
    pub hydration_goal: String,
}

/// A generated 7-day weight loss and wellness plan.
///
/// Created once per successful generation call, read-only thereafter, and
/// discarded on reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightLossPlan {
    pub summary: String,
    pub daily_calories: u32,
    /// Daily protein target in grams.
    pub protein_target: u32,
    pub motivational_quote: String,
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_produce: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_nuts_seeds: Option<Vec<String>>,
    pub weekly_plan: Vec<DailyPlan>,
    /// When this plan was generated. Not part of the model contract.
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
}

impl WeightLossPlan {
    /// Structural validation applied after parsing the model response.
    ///
    /// The response schema is a contract; the external payload is not
    /// trusted until these checks pass.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.weekly_plan.len() != WEEKLY_PLAN_DAYS {
            return Err(GenerationError::SchemaViolation(format!(
                "weeklyPlan must have exactly {WEEKLY_PLAN_DAYS} entries, got {}",
                self.weekly_plan.len()
            )));
        }
        if !(3..=5).contains(&self.tips.len()) {
            return Err(GenerationError::SchemaViolation(format!(
                "tips must have 3-5 entries, got {}",
                self.tips.len()
            )));
        }
        if self.daily_calories == 0 {
            return Err(GenerationError::SchemaViolation(
                "dailyCalories must be positive".to_string(),
            ));
        }
        if self.protein_target == 0 {
            return Err(GenerationError::SchemaViolation(
                "proteinTarget must be positive".to_string(),
            ));
        }
        if let Some(ref produce) = self.seasonal_produce {
            if !(5..=7).contains(&produce.len()) {
                return Err(GenerationError::SchemaViolation(format!(
                    "seasonalProduce must have 5-7 entries, got {}",
                    produce.len()
                )));
            }
        }
        if let Some(ref nuts) = self.recommended_nuts_seeds {
            if !(3..=5).contains(&nuts.len()) {
                return Err(GenerationError::SchemaViolation(format!(
                    "recommendedNutsSeeds must have 3-5 entries, got {}",
                    nuts.len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> WeightLossPlan {
        WeightLossPlan {
            summary: "A gentle week focused on protein and joint-safe movement.".to_string(),
            daily_calories: 1600,
            protein_target: 100,
            motivational_quote: "Age is no barrier.".to_string(),
            tips: vec![
                "Prioritize protein at breakfast".to_string(),
                "Walk after meals".to_string(),
                "Strength train twice a week".to_string(),
            ],
            seasonal_produce: Some(
                ["Strawberries", "Grapefruit", "Sweet corn", "Tomatoes", "Zucchini"]
                    .map(String::from)
                    .to_vec(),
            ),
            recommended_nuts_seeds: Some(
                ["Walnuts", "Chia seeds", "Almonds"].map(String::from).to_vec(),
            ),
            weekly_plan: (1..=7)
                .map(|d| DailyPlan {
                    day: format!("Day {d}"),
                    breakfast: "Greek yogurt with walnuts".to_string(),
                    lunch: "Grilled chicken salad".to_string(),
                    dinner: "Baked salmon with vegetables".to_string(),
                    snack: "Almonds and an apple".to_string(),
                    exercise: "30-minute walk".to_string(),
                    hydration_goal: "8 glasses of water".to_string(),
                })
                .collect(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn valid_plan_passes() {
        assert!(sample_plan().validate().is_ok());
    }

    #[test]
    fn rejects_short_week() {
        let mut plan = sample_plan();
        plan.weekly_plan.pop();
        assert!(matches!(
            plan.validate(),
            Err(GenerationError::SchemaViolation(_))
        ));
    }

    #[test]
    fn rejects_tip_count_outside_range() {
        let mut plan = sample_plan();
        plan.tips.truncate(2);
        assert!(plan.validate().is_err());

        plan = sample_plan();
        plan.tips = (0..6).map(|i| format!("tip {i}")).collect();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn rejects_zero_targets() {
        let mut plan = sample_plan();
        plan.daily_calories = 0;
        assert!(plan.validate().is_err());

        plan = sample_plan();
        plan.protein_target = 0;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn optional_arrays_checked_only_when_present() {
        let mut plan = sample_plan();
        plan.seasonal_produce = None;
        plan.recommended_nuts_seeds = None;
        assert!(plan.validate().is_ok());

        plan.seasonal_produce = Some(vec!["Kale".to_string()]);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn deserializes_model_payload_without_timestamp() {
        let raw = serde_json::json!({
            "summary": "s",
            "dailyCalories": 1500,
            "proteinTarget": 90,
            "motivationalQuote": "q",
            "tips": ["a", "b", "c"],
            "weeklyPlan": (1..=7).map(|d| serde_json::json!({
                "day": format!("Day {d}"),
                "breakfast": "b",
                "lunch": "l",
                "dinner": "d",
                "snack": "s",
                "exercise": "e",
                "hydrationGoal": "h"
            })).collect::<Vec<_>>()
        });

        let plan: WeightLossPlan = serde_json::from_value(raw).unwrap();
        assert_eq!(plan.weekly_plan.len(), 7);
        assert!(plan.seasonal_produce.is_none());
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn serializes_with_original_wire_names() {
        let value = serde_json::to_value(sample_plan()).unwrap();
        assert!(value.get("dailyCalories").is_some());
        assert!(value.get("proteinTarget").is_some());
        assert!(value.get("weeklyPlan").is_some());
        assert!(value["weeklyPlan"][0].get("hydrationGoal").is_some());
    }
}
