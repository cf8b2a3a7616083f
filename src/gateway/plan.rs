//! Plan request gateway — turns a profile into a structured 7-day plan.

use std::sync::Arc;

use tracing::info;

use crate::error::GenerationError;
use crate::llm::{GenerativeClient, StructuredRequest};
use crate::plan::WeightLossPlan;
use crate::profile::UserProfile;

const SYSTEM_INSTRUCTION: &str = "You are a world-class senior fitness and nutrition \
specialist. Your goal is to help people over 50 reclaim their vitality.";

/// Translates a [`UserProfile`] into a generation request and the response
/// back into a validated [`WeightLossPlan`].
pub struct PlanGateway {
    llm: Arc<dyn GenerativeClient>,
}

impl PlanGateway {
    pub fn new(llm: Arc<dyn GenerativeClient>) -> Self {
        Self { llm }
    }

    /// Generate a personalized plan for the given profile.
    ///
    /// Fails with [`GenerationError`] when the call errors, returns no
    /// content, or returns content violating the response contract. No
    /// retry is attempted; the caller decides what a failed attempt means.
    pub async fn generate_plan(
        &self,
        profile: &UserProfile,
    ) -> Result<WeightLossPlan, GenerationError> {
        let request = StructuredRequest {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: plan_prompt(profile),
            response_schema: plan_response_schema(),
        };

        let text = match self.llm.generate_structured(request).await? {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(GenerationError::NoContent),
        };

        let plan: WeightLossPlan = serde_json::from_str(&text)?;
        plan.validate()?;

        info!(
            daily_calories = plan.daily_calories,
            protein_target = plan.protein_target,
            "Generated wellness plan"
        );
        Ok(plan)
    }
}

/// Build the generation prompt, embedding every profile field.
fn plan_prompt(profile: &UserProfile) -> String {
    format!(
        "Create a 7-day weight loss and wellness plan for a {age}-year-old {gender} \
         living in {location}.\n\
         Current weight: {current}lbs, Target: {target}lbs.\n\
         Activity Level: {activity}.\n\
         Health notes: {health}.\n\n\
         CRITICAL CONTEXT FOR 50+:\n\
         - Focus on metabolic health, muscle preservation (protein), and joint safety.\n\
         - Tone: \"Classic, Energetic, Trustworthy\". Avoid slang. Be encouraging but scientific.\n\
         - Suggest foods likely available in {location}.\n\
         - Exercises should be low impact but effective (walking, resistance bands, swimming).\n\n\
         MANDATORY INCLUSIONS:\n\
         1. SEASONAL PRODUCE: Identify fruits and vegetables currently in season for {location}.\n\
         2. NUTS & SEEDS: Explicitly include healthy fats like walnuts, almonds, chia seeds, \
         flaxseeds, etc., which are vital for aging brains and hearts.\n\
         3. Ensure the weekly meal plan incorporates these specific seasonal items and \
         nuts/seeds in the meals or snacks.",
        age = profile.age,
        gender = profile.gender,
        location = profile.location,
        current = profile.current_weight,
        target = profile.target_weight,
        activity = profile.activity_level,
        health = profile.health_conditions.as_deref().unwrap_or("None"),
    )
}

/// The strict output schema attached to every plan request.
fn plan_response_schema() -> serde_json::Value {
    let day_properties: serde_json::Value = serde_json::json!({
        "day": {"type": "STRING"},
        "breakfast": {"type": "STRING"},
        "lunch": {"type": "STRING"},
        "dinner": {"type": "STRING"},
        "snack": {"type": "STRING"},
        "exercise": {
            "type": "STRING",
            "description": "Age-appropriate exercise (e.g. walking, swimming, yoga)."
        },
        "hydrationGoal": {"type": "STRING"}
    });

    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A warm, encouraging summary of the plan tailored for 50+."
            },
            "dailyCalories": {
                "type": "INTEGER",
                "description": "Recommended daily calorie intake."
            },
            "proteinTarget": {
                "type": "INTEGER",
                "description": "Recommended daily protein in grams (crucial for 50+)."
            },
            "motivationalQuote": {
                "type": "STRING",
                "description": "A classic, inspiring quote."
            },
            "tips": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "3-5 Specific tips for weight loss over 50 (e.g. metabolism, bone health)."
            },
            "seasonalProduce": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "List of 5-7 seasonal fruits and vegetables available in the user's location."
            },
            "recommendedNutsSeeds": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "List of 3-5 specific nuts and seeds beneficial for 50+ health (e.g. walnuts, chia)."
            },
            "weeklyPlan": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": day_properties
                }
            }
        },
        "required": [
            "summary", "dailyCalories", "proteinTarget", "weeklyPlan",
            "tips", "motivationalQuote", "seasonalProduce", "recommendedNutsSeeds"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::error::LlmError;
    use crate::llm::{GroundedAnswer, GroundedRequest};
    use crate::profile::{ActivityLevel, Gender};

    /// Scripted client: returns a fixed structured result.
    struct ScriptedClient {
        text: Option<String>,
        fail: bool,
    }

    impl ScriptedClient {
        fn text(text: &str) -> Self {
            Self {
                text: Some(text.to_string()),
                fail: false,
            }
        }

        fn empty() -> Self {
            Self {
                text: None,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                text: None,
                fail: true,
            }
        }
    }

    #[async_trait]
    impl GenerativeClient for ScriptedClient {
        async fn generate_structured(
            &self,
            _request: StructuredRequest,
        ) -> Result<Option<String>, LlmError> {
            if self.fail {
                return Err(LlmError::Http("connection refused".to_string()));
            }
            Ok(self.text.clone())
        }

        async fn generate_grounded(
            &self,
            _request: GroundedRequest,
        ) -> Result<GroundedAnswer, LlmError> {
            Ok(GroundedAnswer::default())
        }
    }

    fn test_profile() -> UserProfile {
        UserProfile {
            age: 62,
            gender: Gender::Female,
            location: "Sarasota, FL".to_string(),
            current_weight: 180.0,
            target_weight: 160.0,
            activity_level: ActivityLevel::Moderate,
            health_conditions: Some("Knee pain".to_string()),
        }
    }

    fn plan_json(days: usize, tips: usize) -> String {
        serde_json::json!({
            "summary": "A gentle, protein-forward week.",
            "dailyCalories": 1600,
            "proteinTarget": 100,
            "motivationalQuote": "Keep going.",
            "tips": (0..tips).map(|i| format!("Tip {i}")).collect::<Vec<_>>(),
            "weeklyPlan": (1..=days).map(|d| serde_json::json!({
                "day": format!("Day {d}"),
                "breakfast": "Oatmeal with chia seeds",
                "lunch": "Salad with grilled chicken",
                "dinner": "Salmon and greens",
                "snack": "Walnuts",
                "exercise": "Walking",
                "hydrationGoal": "8 glasses"
            })).collect::<Vec<_>>()
        })
        .to_string()
    }

    #[test]
    fn prompt_embeds_every_profile_field() {
        let prompt = plan_prompt(&test_profile());
        assert!(prompt.contains("62-year-old Female"));
        assert!(prompt.contains("Sarasota, FL"));
        assert!(prompt.contains("Current weight: 180lbs"));
        assert!(prompt.contains("Target: 160lbs"));
        assert!(prompt.contains("Activity Level: Moderate"));
        assert!(prompt.contains("Health notes: Knee pain"));
        assert!(prompt.contains("SEASONAL PRODUCE"));
        assert!(prompt.contains("NUTS & SEEDS"));
    }

    #[test]
    fn prompt_defaults_missing_health_notes() {
        let mut profile = test_profile();
        profile.health_conditions = None;
        assert!(plan_prompt(&profile).contains("Health notes: None."));
    }

    #[test]
    fn schema_requires_the_contract_fields() {
        let schema = plan_response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for key in [
            "summary",
            "dailyCalories",
            "proteinTarget",
            "weeklyPlan",
            "tips",
            "motivationalQuote",
        ] {
            assert!(required.contains(&key), "missing required key {key}");
        }
        assert_eq!(schema["properties"]["weeklyPlan"]["type"], "ARRAY");
        assert_eq!(
            schema["properties"]["weeklyPlan"]["items"]["properties"]["hydrationGoal"]["type"],
            "STRING"
        );
    }

    #[tokio::test]
    async fn generates_a_valid_plan() {
        let gateway = PlanGateway::new(Arc::new(ScriptedClient::text(&plan_json(7, 3))));
        let plan = gateway.generate_plan(&test_profile()).await.unwrap();
        assert_eq!(plan.weekly_plan.len(), 7);
        assert_eq!(plan.tips.len(), 3);
        assert_eq!(plan.daily_calories, 1600);
    }

    #[tokio::test]
    async fn empty_response_is_no_content() {
        let gateway = PlanGateway::new(Arc::new(ScriptedClient::empty()));
        assert!(matches!(
            gateway.generate_plan(&test_profile()).await,
            Err(GenerationError::NoContent)
        ));

        let gateway = PlanGateway::new(Arc::new(ScriptedClient::text("   ")));
        assert!(matches!(
            gateway.generate_plan(&test_profile()).await,
            Err(GenerationError::NoContent)
        ));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let gateway = PlanGateway::new(Arc::new(ScriptedClient::text("not json at all")));
        assert!(matches!(
            gateway.generate_plan(&test_profile()).await,
            Err(GenerationError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn contract_violations_are_rejected() {
        let gateway = PlanGateway::new(Arc::new(ScriptedClient::text(&plan_json(6, 3))));
        assert!(matches!(
            gateway.generate_plan(&test_profile()).await,
            Err(GenerationError::SchemaViolation(_))
        ));

        let gateway = PlanGateway::new(Arc::new(ScriptedClient::text(&plan_json(7, 2))));
        assert!(matches!(
            gateway.generate_plan(&test_profile()).await,
            Err(GenerationError::SchemaViolation(_))
        ));
    }

    #[tokio::test]
    async fn transport_errors_propagate_unmodified() {
        let gateway = PlanGateway::new(Arc::new(ScriptedClient::failing()));
        assert!(matches!(
            gateway.generate_plan(&test_profile()).await,
            Err(GenerationError::Llm(LlmError::Http(_)))
        ));
    }
}
