//! Onboarding wizard state machine — tracks which step the user is on.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

use super::model::{ProfileDraft, UserProfile};

/// The steps of the onboarding wizard.
///
/// Progresses linearly: AboutYou → GoalsLocation → FinalTouches. Advancing
/// past the final step submits the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    AboutYou,
    GoalsLocation,
    FinalTouches,
}

impl WizardStep {
    /// 1-based step number, as shown on the progress bar.
    pub fn number(&self) -> u8 {
        match self {
            Self::AboutYou => 1,
            Self::GoalsLocation => 2,
            Self::FinalTouches => 3,
        }
    }

    /// The following step, if any.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            Self::AboutYou => Some(Self::GoalsLocation),
            Self::GoalsLocation => Some(Self::FinalTouches),
            Self::FinalTouches => None,
        }
    }

    /// The preceding step, if any.
    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            Self::AboutYou => None,
            Self::GoalsLocation => Some(Self::AboutYou),
            Self::FinalTouches => Some(Self::GoalsLocation),
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::AboutYou
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AboutYou => "about_you",
            Self::GoalsLocation => "goals_location",
            Self::FinalTouches => "final_touches",
        };
        write!(f, "{s}")
    }
}

/// Outcome of advancing the wizard.
#[derive(Debug, Clone)]
pub enum Advance {
    /// Moved to the next step.
    Moved(WizardStep),
    /// The final step was valid; the finished profile is handed to the
    /// caller. The wizard's job ends here — it never calls the gateway.
    Submitted(UserProfile),
}

/// The three-step onboarding wizard: current step plus accumulated draft.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    draft: ProfileDraft,
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::AboutYou,
            draft: ProfileDraft::prefilled(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Overlay a field update onto the draft. Field mutation is the wizard's
    /// only side effect; no I/O happens here.
    pub fn update(&mut self, patch: ProfileDraft) {
        self.draft.merge(patch);
    }

    /// Whether the current step's gate is satisfied.
    pub fn is_step_valid(&self) -> bool {
        match self.step {
            WizardStep::AboutYou => self.draft.about_you_complete(),
            WizardStep::GoalsLocation => self.draft.goals_location_complete(),
            // Health notes are optional; the final step always passes.
            WizardStep::FinalTouches => true,
        }
    }

    /// Advance to the next step, or submit from the final step.
    ///
    /// Submission re-validates the required fields via
    /// [`ProfileDraft::finish`], independently of step gating.
    pub fn advance(&mut self) -> Result<Advance, ProfileError> {
        if !self.is_step_valid() {
            return Err(ProfileError::StepIncomplete(self.step.number()));
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(Advance::Moved(next))
            }
            None => Ok(Advance::Submitted(self.draft.finish()?)),
        }
    }

    /// Go back one step. Always allowed except on the first step.
    pub fn back(&mut self) -> Result<WizardStep, ProfileError> {
        let prev = self.step.prev().ok_or(ProfileError::AtFirstStep)?;
        self.step = prev;
        Ok(prev)
    }
}
