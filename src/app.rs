//! Application controller — sequences onboarding, generation, and dashboard.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{ControllerError, Error};
use crate::gateway::{LocalResourceGateway, LocalResourcesResponse, PlanGateway};
use crate::llm::GenerativeClient;
use crate::plan::WeightLossPlan;
use crate::profile::{Advance, ProfileDraft, UserProfile, Wizard, WizardStep};

/// Notice shown after a failed generation attempt.
const GENERATION_FAILED_NOTICE: &str =
    "We encountered an issue creating your plan. Please try again.";

/// The screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    Onboarding,
    Generating,
    Dashboard,
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Onboarding => "ONBOARDING",
            Self::Generating => "GENERATING",
            Self::Dashboard => "DASHBOARD",
        };
        write!(f, "{s}")
    }
}

/// Events driving the application state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A complete profile was submitted from the wizard.
    Submit,
    /// The generation call produced a valid plan.
    GenerationSucceeded,
    /// The generation call failed; the attempt is terminal.
    GenerationFailed,
    /// The user asked to start over from the dashboard.
    Reset,
}

impl AppState {
    /// Pure transition function. Returns `None` for illegal (state, event)
    /// pairs; the caller decides whether that is an error or a stale event.
    pub fn apply(self, event: AppEvent) -> Option<AppState> {
        match (self, event) {
            (Self::Onboarding, AppEvent::Submit) => Some(Self::Generating),
            (Self::Generating, AppEvent::GenerationSucceeded) => Some(Self::Dashboard),
            (Self::Generating, AppEvent::GenerationFailed) => Some(Self::Onboarding),
            (Self::Dashboard, AppEvent::Reset) => Some(Self::Onboarding),
            _ => None,
        }
    }
}

/// Snapshot of the controller's state for the status endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub state: AppState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<WizardStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<ProfileDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<WeightLossPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

struct Inner {
    state: AppState,
    wizard: Wizard,
    profile: Option<UserProfile>,
    plan: Option<WeightLossPlan>,
    notice: Option<String>,
}

impl Inner {
    fn new() -> Self {
        Self {
            state: AppState::Onboarding,
            wizard: Wizard::new(),
            profile: None,
            plan: None,
            notice: None,
        }
    }
}

/// Owns the process-wide application state and drives it through
/// onboarding → generating → dashboard.
pub struct AppController {
    inner: RwLock<Inner>,
    plan_gateway: PlanGateway,
    local_gateway: LocalResourceGateway,
}

impl AppController {
    pub fn new(llm: Arc<dyn GenerativeClient>, config: &AppConfig) -> Self {
        Self {
            inner: RwLock::new(Inner::new()),
            plan_gateway: PlanGateway::new(Arc::clone(&llm)),
            local_gateway: LocalResourceGateway::new(llm, config.fallback_center),
        }
    }

    /// Current state snapshot.
    pub async fn status(&self) -> StatusSnapshot {
        let inner = self.inner.read().await;
        let in_wizard = inner.state == AppState::Onboarding;
        StatusSnapshot {
            state: inner.state,
            step: in_wizard.then(|| inner.wizard.step()),
            draft: in_wizard.then(|| inner.wizard.draft().clone()),
            profile: inner.profile.clone(),
            plan: inner.plan.clone(),
            notice: inner.notice.clone(),
        }
    }

    /// Overlay a field update onto the wizard draft.
    pub async fn update_draft(&self, patch: ProfileDraft) -> Result<StatusSnapshot, Error> {
        {
            let mut inner = self.inner.write().await;
            Self::require_state(&inner, AppState::Onboarding, "update profile fields")?;
            inner.wizard.update(patch);
        }
        Ok(self.status().await)
    }

    /// Advance the wizard. From the final step this submits the profile and
    /// runs the generation request to completion; the returned snapshot then
    /// reflects either the dashboard or a failed attempt back in onboarding.
    pub async fn wizard_next(&self) -> Result<StatusSnapshot, Error> {
        let submitted = {
            let mut inner = self.inner.write().await;
            Self::require_state(&inner, AppState::Onboarding, "advance the wizard")?;
            match inner.wizard.advance()? {
                Advance::Moved(step) => {
                    debug!(step = %step, "Wizard advanced");
                    None
                }
                Advance::Submitted(profile) => {
                    // Submit is legal here by the state check above.
                    if let Some(next) = inner.state.apply(AppEvent::Submit) {
                        inner.state = next;
                    }
                    inner.profile = Some(profile.clone());
                    inner.notice = None;
                    Some(profile)
                }
            }
        };

        // The lock is released while the external call runs; a concurrent
        // status request observes GENERATING, and a concurrent submit is
        // rejected by the state check.
        if let Some(profile) = submitted {
            self.run_generation(profile).await;
        }

        Ok(self.status().await)
    }

    /// Go back one wizard step.
    pub async fn wizard_back(&self) -> Result<StatusSnapshot, Error> {
        {
            let mut inner = self.inner.write().await;
            Self::require_state(&inner, AppState::Onboarding, "go back a step")?;
            inner.wizard.back()?;
        }
        Ok(self.status().await)
    }

    /// Clear the profile and plan and return to onboarding.
    pub async fn reset(&self) -> Result<StatusSnapshot, Error> {
        {
            let mut inner = self.inner.write().await;
            let next = inner
                .state
                .apply(AppEvent::Reset)
                .ok_or_else(|| ControllerError::WrongState {
                    state: inner.state.to_string(),
                    action: "reset".to_string(),
                })?;
            inner.state = next;
            inner.profile = None;
            inner.plan = None;
            inner.notice = None;
            inner.wizard = Wizard::new();
            info!("Application reset to onboarding");
        }
        Ok(self.status().await)
    }

    /// The generated plan, if the dashboard is showing one.
    pub async fn plan(&self) -> Option<WeightLossPlan> {
        self.inner.read().await.plan.clone()
    }

    /// Search for local wellness resources near the submitted profile's
    /// location. The gateway itself never fails; this errors only when no
    /// profile has been submitted yet.
    pub async fn local_search(&self, query: &str) -> Result<LocalResourcesResponse, Error> {
        let location = {
            let inner = self.inner.read().await;
            inner
                .profile
                .as_ref()
                .map(|p| p.location.clone())
                .ok_or_else(|| ControllerError::WrongState {
                    state: inner.state.to_string(),
                    action: "search local resources".to_string(),
                })?
        };
        Ok(self.local_gateway.find_local_spots(&location, query).await)
    }

    /// Run one generation attempt for a submitted profile and apply the
    /// outcome. Failure is terminal for the attempt: the profile is
    /// discarded and the user restarts the wizard from scratch.
    async fn run_generation(&self, profile: UserProfile) {
        let attempt = Uuid::new_v4();
        info!(
            attempt = %attempt,
            age = profile.age,
            location = %profile.location,
            "Generating wellness plan"
        );

        match self.plan_gateway.generate_plan(&profile).await {
            Ok(plan) => {
                let mut inner = self.inner.write().await;
                match inner.state.apply(AppEvent::GenerationSucceeded) {
                    Some(next) => {
                        inner.state = next;
                        inner.plan = Some(plan);
                        info!(attempt = %attempt, "Plan ready; showing dashboard");
                    }
                    None => {
                        debug!(attempt = %attempt, "Discarding stale generation result");
                    }
                }
            }
            Err(e) => {
                warn!(attempt = %attempt, error = %e, "Plan generation failed");
                let mut inner = self.inner.write().await;
                match inner.state.apply(AppEvent::GenerationFailed) {
                    Some(next) => {
                        inner.state = next;
                        inner.profile = None;
                        inner.plan = None;
                        inner.wizard = Wizard::new();
                        inner.notice = Some(GENERATION_FAILED_NOTICE.to_string());
                    }
                    None => {
                        debug!(attempt = %attempt, "Discarding stale generation failure");
                    }
                }
            }
        }
    }

    fn require_state(
        inner: &Inner,
        expected: AppState,
        action: &str,
    ) -> Result<(), ControllerError> {
        if inner.state != expected {
            return Err(ControllerError::WrongState {
                state: inner.state.to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }
}
