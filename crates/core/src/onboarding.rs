//! Onboarding step derivation.
//!
//! Step statuses are never stored: they are derived in full from the
//! server-side profile flags (plus persona/project existence) on every
//! read, so the client cache can never drift from the source of truth.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The fixed, ordered onboarding steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingStepId {
    Onboarding,
    ReviewBrand,
    ReviewPersona,
    Connect,
    Upload,
}

/// All steps in wizard order.
pub const ALL_STEPS: &[OnboardingStepId] = &[
    OnboardingStepId::Onboarding,
    OnboardingStepId::ReviewBrand,
    OnboardingStepId::ReviewPersona,
    OnboardingStepId::Connect,
    OnboardingStepId::Upload,
];

impl OnboardingStepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::ReviewBrand => "review-brand",
            Self::ReviewPersona => "review-persona",
            Self::Connect => "connect",
            Self::Upload => "upload",
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "onboarding" => Ok(Self::Onboarding),
            "review-brand" => Ok(Self::ReviewBrand),
            "review-persona" => Ok(Self::ReviewPersona),
            "connect" => Ok(Self::Connect),
            "upload" => Ok(Self::Upload),
            other => Err(format!("Unknown onboarding step: {other}")),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Onboarding => "Set up your account",
            Self::ReviewBrand => "Review your brand",
            Self::ReviewPersona => "Review your AI persona",
            Self::Connect => "Connect your socials",
            Self::Upload => "Upload your first video",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Onboarding => "Tell us about yourself and your content",
            Self::ReviewBrand => "Check the brand identity we generated for you",
            Self::ReviewPersona => "Approve the persona built from your photos",
            Self::Connect => "Link the platforms you publish to",
            Self::Upload => "Upload a video to generate your first content",
        }
    }

    /// Description override shown when the step was explicitly skipped.
    fn skipped_description(&self) -> &'static str {
        match self {
            Self::ReviewBrand => "Skipped -- you can revisit brand settings anytime",
            Self::ReviewPersona => "Skipped -- you can create a persona later",
            Self::Connect => "Skipped -- connect platforms when you're ready to publish",
            _ => "Skipped",
        }
    }
}

/// Derived status of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// One step with its derived status, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedStep {
    pub id: OnboardingStepId,
    pub title: &'static str,
    pub description: &'static str,
    pub status: StepStatus,
}

// ---------------------------------------------------------------------------
// Profile flags
// ---------------------------------------------------------------------------

/// The server-side booleans that onboarding state is derived from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileFlags {
    pub onboarding_completed: bool,
    pub brand_reviewed: bool,
    pub brand_analysis_skipped: bool,
    pub persona_reviewed: bool,
    pub persona_skipped: bool,
    pub socials_connected: bool,
    pub socials_skipped: bool,
}

/// Flag names accepted by the mark-reviewed endpoint.
pub const REVIEWABLE_FIELDS: &[&str] = &[
    "onboarding_completed",
    "brand_reviewed",
    "brand_analysis_skipped",
    "persona_reviewed",
    "persona_skipped",
    "socials_connected",
    "socials_skipped",
];

/// Validate that a mark-reviewed field name is one of the known flags.
pub fn validate_reviewed_field(field: &str) -> Result<(), CoreError> {
    if REVIEWABLE_FIELDS.contains(&field) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid field '{field}'. Must be one of: {REVIEWABLE_FIELDS:?}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Whether a step counts as completed, and whether via the skip path.
fn completion(step: OnboardingStepId, flags: &ProfileFlags, has_project: bool) -> (bool, bool) {
    match step {
        OnboardingStepId::Onboarding => (flags.onboarding_completed, false),
        OnboardingStepId::ReviewBrand => (
            flags.brand_reviewed || flags.brand_analysis_skipped,
            !flags.brand_reviewed && flags.brand_analysis_skipped,
        ),
        OnboardingStepId::ReviewPersona => (
            flags.persona_reviewed || flags.persona_skipped,
            !flags.persona_reviewed && flags.persona_skipped,
        ),
        OnboardingStepId::Connect => (
            flags.socials_connected || flags.socials_skipped,
            !flags.socials_connected && flags.socials_skipped,
        ),
        OnboardingStepId::Upload => (has_project, false),
    }
}

/// Derive the ordered step list from the profile record.
///
/// Always a full recompute: the first non-completed step in order becomes
/// `current` and everything after it `upcoming`, regardless of any flags
/// set out of order.
pub fn derive_steps(flags: &ProfileFlags, has_project: bool) -> Vec<DerivedStep> {
    let mut current_assigned = false;
    ALL_STEPS
        .iter()
        .map(|&step| {
            let (completed, skipped) = completion(step, flags, has_project);
            let status = if completed {
                StepStatus::Completed
            } else if !current_assigned {
                current_assigned = true;
                StepStatus::Current
            } else {
                StepStatus::Upcoming
            };
            DerivedStep {
                id: step,
                title: step.title(),
                description: if skipped {
                    step.skipped_description()
                } else {
                    step.description()
                },
                status,
            }
        })
        .collect()
}

/// Reject navigation into an `upcoming` step.
///
/// The error names the current step so the UI can tell the user what to
/// finish first.
pub fn check_step_entry(steps: &[DerivedStep], target: OnboardingStepId) -> Result<(), CoreError> {
    let target_step = steps
        .iter()
        .find(|s| s.id == target)
        .ok_or_else(|| CoreError::Validation(format!("Unknown step '{}'", target.as_str())))?;

    if target_step.status != StepStatus::Upcoming {
        return Ok(());
    }

    let current = steps
        .iter()
        .find(|s| s.status == StepStatus::Current)
        .map(|s| s.id.as_str())
        .unwrap_or("the current step");
    Err(CoreError::Validation(format!(
        "Finish '{current}' before moving on to '{}'",
        target.as_str()
    )))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
