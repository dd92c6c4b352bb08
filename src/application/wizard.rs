//! Four-step signup wizard, modeled as an explicit state machine: one
//! validation predicate per step and a fixed transition table. Forward
//! transitions are gated on the current step's predicate, so a draft can
//! never reach review with an invalid earlier step.

use serde::{Deserialize, Serialize};

use crate::app_error::FieldError;
use crate::entities::{Interest, Stage};
use crate::validators::{fields, sanitize_email, sanitize_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Identity,
    Stage,
    Motivation,
    Review,
}

/// (state, backward target, forward target)
const TRANSITIONS: [(WizardStep, Option<WizardStep>, Option<WizardStep>); 4] = [
    (WizardStep::Identity, None, Some(WizardStep::Stage)),
    (
        WizardStep::Stage,
        Some(WizardStep::Identity),
        Some(WizardStep::Motivation),
    ),
    (
        WizardStep::Motivation,
        Some(WizardStep::Stage),
        Some(WizardStep::Review),
    ),
    (WizardStep::Review, Some(WizardStep::Motivation), None),
];

impl WizardStep {
    pub const TOTAL: u8 = 4;

    pub fn number(self) -> u8 {
        match self {
            WizardStep::Identity => 1,
            WizardStep::Stage => 2,
            WizardStep::Motivation => 3,
            WizardStep::Review => 4,
        }
    }

    fn transition(self) -> (Option<WizardStep>, Option<WizardStep>) {
        TRANSITIONS
            .iter()
            .find(|(step, _, _)| *step == self)
            .map(|(_, back, forward)| (*back, *forward))
            .expect("every step has a transition row")
    }
}

/// The in-progress field set of a detailed signup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftFields {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub stage: Option<Stage>,
    pub motivation: String,
    pub interests: Vec<Interest>,
    pub newsletter: bool,
}

impl Default for DraftFields {
    fn default() -> Self {
        Self {
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            company: None,
            role: None,
            stage: None,
            motivation: String::new(),
            interests: Vec::new(),
            newsletter: true,
        }
    }
}

/// Partial update applied to a draft; unset fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub stage: Option<Stage>,
    pub motivation: Option<String>,
    pub interests: Option<Vec<Interest>>,
    pub newsletter: Option<bool>,
}

/// Validated, sanitized payload produced by a finished wizard; the input to
/// the detailed submission pipeline.
#[derive(Debug, Clone)]
pub struct DetailedSignup {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub stage: Stage,
    pub motivation: String,
    pub interests: Vec<Interest>,
    pub newsletter: bool,
}

impl DetailedSignup {
    /// Full field-set validation, re-run by the submission pipeline.
    pub fn field_errors(&self) -> Vec<FieldError> {
        [
            fields::email(&self.email),
            fields::first_name(&self.first_name),
            fields::last_name(&self.last_name),
            fields::company(self.company.as_deref()),
            fields::role(self.role.as_deref()),
            fields::stage(Some(self.stage)),
            fields::motivation(&self.motivation),
            fields::interests(&self.interests),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct FormDraft {
    step: WizardStep,
    fields: DraftFields,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl FormDraft {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Identity,
            fields: DraftFields::default(),
        }
    }

    /// Seed the draft with an email typed into the quick-signup field before
    /// the visitor switched to the full form.
    pub fn with_email(email: &str) -> Self {
        let mut draft = Self::new();
        draft.fields.email = email.trim().to_string();
        draft
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn fields(&self) -> &DraftFields {
        &self.fields
    }

    pub fn apply(&mut self, patch: DraftPatch) {
        let DraftPatch {
            email,
            first_name,
            last_name,
            company,
            role,
            stage,
            motivation,
            interests,
            newsletter,
        } = patch;

        if let Some(email) = email {
            self.fields.email = email;
        }
        if let Some(first_name) = first_name {
            self.fields.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.fields.last_name = last_name;
        }
        if let Some(company) = company {
            // An emptied input clears the optional field.
            self.fields.company = (!company.trim().is_empty()).then_some(company);
        }
        if let Some(role) = role {
            self.fields.role = (!role.trim().is_empty()).then_some(role);
        }
        if let Some(stage) = stage {
            self.fields.stage = Some(stage);
        }
        if let Some(motivation) = motivation {
            self.fields.motivation = motivation;
        }
        if let Some(mut interests) = interests {
            let mut seen = Vec::new();
            interests.retain(|interest| {
                let fresh = !seen.contains(interest);
                seen.push(*interest);
                fresh
            });
            self.fields.interests = interests;
        }
        if let Some(newsletter) = newsletter {
            self.fields.newsletter = newsletter;
        }
    }

    /// The validation predicate for one step. Review is always passable; the
    /// earlier steps gate on their own fields only.
    pub fn step_errors(&self, step: WizardStep) -> Vec<FieldError> {
        let checks: Vec<Option<FieldError>> = match step {
            WizardStep::Identity => vec![
                fields::email(&self.fields.email),
                fields::first_name(&self.fields.first_name),
                fields::last_name(&self.fields.last_name),
                fields::company(self.fields.company.as_deref()),
                fields::role(self.fields.role.as_deref()),
            ],
            WizardStep::Stage => vec![fields::stage(self.fields.stage)],
            WizardStep::Motivation => vec![
                fields::motivation(&self.fields.motivation),
                fields::interests(&self.fields.interests),
            ],
            WizardStep::Review => vec![],
        };
        checks.into_iter().flatten().collect()
    }

    /// Move forward one step. Refused (cursor unchanged) while the current
    /// step's predicate fails; a no-op on the review step.
    pub fn advance(&mut self) -> Result<WizardStep, Vec<FieldError>> {
        let errors = self.step_errors(self.step);
        if !errors.is_empty() {
            return Err(errors);
        }
        if let (_, Some(next)) = self.step.transition() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move back one step; never below the first. Backward transitions are
    /// not gated.
    pub fn back(&mut self) -> WizardStep {
        if let (Some(previous), _) = self.step.transition() {
            self.step = previous;
        }
        self.step
    }

    /// Run the full field-set validation and produce the sanitized
    /// submission payload. The cursor is untouched, so a failing finish
    /// leaves the draft on the review step with its errors.
    pub fn finish(&self) -> Result<DetailedSignup, Vec<FieldError>> {
        let errors: Vec<FieldError> = [
            WizardStep::Identity,
            WizardStep::Stage,
            WizardStep::Motivation,
        ]
        .into_iter()
        .flat_map(|step| self.step_errors(step))
        .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        let fields = &self.fields;
        Ok(DetailedSignup {
            email: sanitize_email(&fields.email),
            first_name: sanitize_name(&fields.first_name),
            last_name: sanitize_name(&fields.last_name),
            company: fields.company.as_deref().map(sanitize_name),
            role: fields.role.as_deref().map(sanitize_name),
            stage: fields.stage.expect("stage validated above"),
            motivation: fields.motivation.trim().to_string(),
            interests: fields.interests.clone(),
            newsletter: fields.newsletter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_identity(draft: &mut FormDraft) {
        draft.apply(DraftPatch {
            email: Some("max@example.com".into()),
            first_name: Some("Max".into()),
            last_name: Some("Mustermann".into()),
            ..Default::default()
        });
    }

    #[test]
    fn new_draft_starts_on_identity_with_newsletter_opt_in() {
        let draft = FormDraft::new();
        assert_eq!(draft.step(), WizardStep::Identity);
        assert!(draft.fields().newsletter);
    }

    #[test]
    fn cannot_advance_past_identity_with_missing_names() {
        let mut draft = FormDraft::with_email("max@example.com");
        let errors = draft.advance().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "firstName"));
        assert!(errors.iter().any(|e| e.field == "lastName"));
        assert_eq!(draft.step(), WizardStep::Identity);
    }

    #[test]
    fn advances_step_by_step_when_each_gate_passes() {
        let mut draft = FormDraft::new();
        valid_identity(&mut draft);
        assert_eq!(draft.advance().unwrap(), WizardStep::Stage);

        draft.apply(DraftPatch {
            stage: Some(Stage::Mvp),
            ..Default::default()
        });
        assert_eq!(draft.advance().unwrap(), WizardStep::Motivation);

        draft.apply(DraftPatch {
            motivation: Some("Ich möchte Investoren treffen".into()),
            interests: Some(vec![Interest::Funding, Interest::Networking]),
            ..Default::default()
        });
        assert_eq!(draft.advance().unwrap(), WizardStep::Review);
    }

    #[test]
    fn nine_character_motivation_blocks_the_motivation_step() {
        let mut draft = FormDraft::new();
        valid_identity(&mut draft);
        draft.advance().unwrap();
        draft.apply(DraftPatch {
            stage: Some(Stage::Mvp),
            ..Default::default()
        });
        draft.advance().unwrap();

        draft.apply(DraftPatch {
            motivation: Some("123456789".into()),
            interests: Some(vec![Interest::Funding, Interest::Networking]),
            ..Default::default()
        });
        let errors = draft.advance().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "motivation");
        assert_eq!(draft.step(), WizardStep::Motivation);
    }

    #[test]
    fn missing_stage_blocks_step_two_even_with_later_fields_filled() {
        let mut draft = FormDraft::new();
        valid_identity(&mut draft);
        draft.apply(DraftPatch {
            motivation: Some("Eine ausreichend lange Motivation".into()),
            interests: Some(vec![Interest::Funding]),
            ..Default::default()
        });
        draft.advance().unwrap();
        assert_eq!(draft.step(), WizardStep::Stage);

        let errors = draft.advance().unwrap_err();
        assert_eq!(errors[0].field, "stage");
        assert_eq!(draft.step(), WizardStep::Stage);
    }

    #[test]
    fn back_walks_to_identity_and_stops() {
        let mut draft = FormDraft::new();
        valid_identity(&mut draft);
        draft.advance().unwrap();
        assert_eq!(draft.back(), WizardStep::Identity);
        assert_eq!(draft.back(), WizardStep::Identity);
    }

    #[test]
    fn advance_on_review_is_a_no_op() {
        let mut draft = FormDraft::new();
        valid_identity(&mut draft);
        draft.advance().unwrap();
        draft.apply(DraftPatch {
            stage: Some(Stage::Idea),
            ..Default::default()
        });
        draft.advance().unwrap();
        draft.apply(DraftPatch {
            motivation: Some("Eine ausreichend lange Motivation".into()),
            interests: Some(vec![Interest::Learning]),
            ..Default::default()
        });
        draft.advance().unwrap();
        assert_eq!(draft.advance().unwrap(), WizardStep::Review);
    }

    #[test]
    fn finish_sanitizes_the_payload() {
        let mut draft = FormDraft::new();
        draft.apply(DraftPatch {
            email: Some("  Max@Example.COM ".into()),
            first_name: Some("  Max ".into()),
            last_name: Some("Muster  mann".into()),
            company: Some("ACME   GmbH".into()),
            stage: Some(Stage::Growth),
            motivation: Some("  Kontakte zu Investoren knüpfen  ".into()),
            interests: Some(vec![Interest::Funding, Interest::Funding]),
            newsletter: Some(false),
            ..Default::default()
        });

        let signup = draft.finish().unwrap();
        assert_eq!(signup.email, "max@example.com");
        assert_eq!(signup.first_name, "Max");
        assert_eq!(signup.last_name, "Muster mann");
        assert_eq!(signup.company.as_deref(), Some("ACME GmbH"));
        assert_eq!(signup.role, None);
        assert_eq!(signup.motivation, "Kontakte zu Investoren knüpfen");
        // Duplicate toggles collapse to one tag.
        assert_eq!(signup.interests, vec![Interest::Funding]);
        assert!(!signup.newsletter);
    }

    #[test]
    fn finish_reports_all_outstanding_errors() {
        let draft = FormDraft::new();
        let errors = draft.finish().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"firstName"));
        assert!(fields.contains(&"stage"));
        assert!(fields.contains(&"motivation"));
        assert!(fields.contains(&"interests"));
    }

    #[test]
    fn emptied_optional_fields_clear_to_none() {
        let mut draft = FormDraft::new();
        draft.apply(DraftPatch {
            company: Some("ACME".into()),
            ..Default::default()
        });
        assert_eq!(draft.fields().company.as_deref(), Some("ACME"));
        draft.apply(DraftPatch {
            company: Some("   ".into()),
            ..Default::default()
        });
        assert_eq!(draft.fields().company, None);
    }
}
