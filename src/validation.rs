//! Input validation for scheduling runs.
//!
//! Checks structural integrity of actors, targets, actions and server
//! settings before scheduling. Detects:
//! - Duplicate actor or target IDs
//! - Planned actions (`waves > 0`) referencing unknown actors or targets
//! - Tier bonus levels outside 0..=20
//! - Non-positive world speed or unit base speeds
//!
//! All issues are collected; validation does not stop at the first one.

use crate::models::{ActionPlan, ServerSettings, MAX_TIER_BONUS};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An action references an actor that doesn't exist.
    UnknownActor,
    /// An action references a target that doesn't exist.
    UnknownTarget,
    /// An actor's tier bonus is above the maximum level.
    TierBonusOutOfRange,
    /// A speed constant is zero, negative or not finite.
    InvalidSpeed,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates the input data of a scheduling run.
///
/// Checks:
/// 1. No duplicate actor IDs
/// 2. No duplicate target IDs
/// 3. Every tier bonus is within 0..=20
/// 4. Every planned action references an existing actor and target
///    (zero-wave entries are not scheduled and may be stale)
/// 5. World speed and all unit base speeds are positive and finite
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(plan: &ActionPlan, settings: &ServerSettings) -> ValidationResult {
    let mut errors = Vec::new();

    let mut actor_ids = HashSet::new();
    for actor in &plan.actors {
        if !actor_ids.insert(actor.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate actor ID: {}", actor.id),
            ));
        }
        if actor.tier_bonus > MAX_TIER_BONUS {
            errors.push(ValidationError::new(
                ValidationErrorKind::TierBonusOutOfRange,
                format!(
                    "Actor '{}' has tier bonus {} (max {MAX_TIER_BONUS})",
                    actor.id, actor.tier_bonus
                ),
            ));
        }
    }

    let mut target_ids = HashSet::new();
    for target in &plan.targets {
        if !target_ids.insert(target.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate target ID: {}", target.id),
            ));
        }
    }

    for action in plan.planned_actions() {
        if !actor_ids.contains(action.actor_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownActor,
                format!(
                    "Action to '{}' references unknown actor '{}'",
                    action.target_id, action.actor_id
                ),
            ));
        }
        if !target_ids.contains(action.target_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTarget,
                format!(
                    "Action from '{}' references unknown target '{}'",
                    action.actor_id, action.target_id
                ),
            ));
        }
    }

    if !is_positive(settings.speed_multiplier) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSpeed,
            format!("Invalid world speed multiplier: {}", settings.speed_multiplier),
        ));
    }
    for (kind, speed) in settings.unit_speeds.entries() {
        if !is_positive(speed) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSpeed,
                format!("Invalid unit base speed for {kind:?}: {speed}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
