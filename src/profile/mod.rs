//! User profile collection — the three-step onboarding wizard.
//!
//! The wizard accumulates a `ProfileDraft` across steps and only converts it
//! to an immutable `UserProfile` once every required field validates. A
//! partially-valid profile never leaves this module.

pub mod model;
pub mod wizard;

pub use model::{ActivityLevel, Gender, ProfileDraft, UserProfile};
pub use wizard::{Advance, Wizard, WizardStep};
