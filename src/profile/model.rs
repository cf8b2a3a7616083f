//! User profile data model.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Self-reported gender. Wire values match the original intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl Default for Gender {
    fn default() -> Self {
        Self::Female
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
            Self::PreferNotToSay => write!(f, "Prefer not to say"),
        }
    }
}

/// How active the user currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl Default for ActivityLevel {
    fn default() -> Self {
        Self::Moderate
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sedentary => write!(f, "Sedentary"),
            Self::Light => write!(f, "Light"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Active => write!(f, "Active"),
        }
    }
}

/// Minimum supported age. The plan is written for people over 50.
pub const MIN_AGE: u32 = 50;
/// Maximum supported age.
pub const MAX_AGE: u32 = 110;

/// A complete, validated user profile.
///
/// Built only through [`ProfileDraft::finish`]; immutable once handed to the
/// controller for submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub location: String,
    /// Current weight in pounds.
    pub current_weight: f64,
    /// Target weight in pounds.
    pub target_weight: f64,
    pub activity_level: ActivityLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_conditions: Option<String>,
}

/// Partially filled profile accumulated across wizard steps.
///
/// Every field is optional; the draft converts to a [`UserProfile`] only via
/// [`ProfileDraft::finish`], which re-validates the required fields. The
/// `Default` value is the empty patch — a deserialized field update carries
/// `Some` only for the fields the client actually sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub location: Option<String>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub health_conditions: Option<String>,
}

impl ProfileDraft {
    /// The wizard's starting draft. Gender and activity level begin
    /// preselected, as on the original intake form.
    pub fn prefilled() -> Self {
        Self {
            gender: Some(Gender::default()),
            activity_level: Some(ActivityLevel::default()),
            ..Self::default()
        }
    }

    /// Overlay the `Some` fields of `patch` onto this draft.
    pub fn merge(&mut self, patch: ProfileDraft) {
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
        if let Some(gender) = patch.gender {
            self.gender = Some(gender);
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(weight) = patch.current_weight {
            self.current_weight = Some(weight);
        }
        if let Some(weight) = patch.target_weight {
            self.target_weight = Some(weight);
        }
        if let Some(level) = patch.activity_level {
            self.activity_level = Some(level);
        }
        if let Some(notes) = patch.health_conditions {
            self.health_conditions = Some(notes);
        }
    }

    /// Whether the "About You" step is satisfied: age in range, gender set.
    pub fn about_you_complete(&self) -> bool {
        matches!(self.age, Some(age) if (MIN_AGE..=MAX_AGE).contains(&age)) && self.gender.is_some()
    }

    /// Whether the "Goals & Location" step is satisfied: both weights
    /// positive, location non-empty.
    pub fn goals_location_complete(&self) -> bool {
        let weights_ok = matches!(self.current_weight, Some(w) if w > 0.0)
            && matches!(self.target_weight, Some(w) if w > 0.0);
        let location_ok = self
            .location
            .as_deref()
            .is_some_and(|l| !l.trim().is_empty());
        weights_ok && location_ok
    }

    /// Convert into an immutable [`UserProfile`].
    ///
    /// Re-validates the required fields independently of step gating, so a
    /// draft that bypassed the wizard cannot produce a partial profile.
    pub fn finish(&self) -> Result<UserProfile, ProfileError> {
        let age = self.age.ok_or(ProfileError::Missing("age"))?;
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ProfileError::AgeOutOfRange(age));
        }

        let location = self
            .location
            .as_deref()
            .ok_or(ProfileError::Missing("location"))?
            .trim()
            .to_string();
        if location.is_empty() {
            return Err(ProfileError::EmptyLocation);
        }

        let current_weight = self
            .current_weight
            .ok_or(ProfileError::Missing("currentWeight"))?;
        if current_weight <= 0.0 {
            return Err(ProfileError::NonPositiveWeight("currentWeight"));
        }

        let target_weight = self
            .target_weight
            .ok_or(ProfileError::Missing("targetWeight"))?;
        if target_weight <= 0.0 {
            return Err(ProfileError::NonPositiveWeight("targetWeight"));
        }

        let health_conditions = self
            .health_conditions
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        Ok(UserProfile {
            age,
            gender: self.gender.unwrap_or_default(),
            location,
            current_weight,
            target_weight,
            activity_level: self.activity_level.unwrap_or_default(),
            health_conditions,
        })
    }
}
