use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_error::FieldError;
use crate::entities::{Interest, Stage};

/// Shape check only (`local@domain.tld`), no deliverability or DNS lookup.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile"));

/// Letters (including German umlauts and ß), spaces and hyphens.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-ZäöüÄÖÜß\s-]+$").expect("name regex must compile"));

pub fn validate_email(input: &str) -> bool {
    EMAIL_RE.is_match(input.trim())
}

/// Trim and lowercase; the result is the canonical form of the natural key.
pub fn sanitize_email(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Trim and collapse internal whitespace runs to single spaces.
pub fn sanitize_name(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn validate_name(input: &str) -> bool {
    let name = input.trim();
    name.chars().count() >= 2 && NAME_RE.is_match(name)
}

/// Per-field checks for the detailed signup form. Each returns the first
/// violated constraint as a `FieldError`, in the order the form reports them.
pub mod fields {
    use super::*;

    pub fn email(value: &str) -> Option<FieldError> {
        if validate_email(value) {
            None
        } else {
            Some(FieldError::new(
                "email",
                "Bitte geben Sie eine gültige E-Mail-Adresse ein",
            ))
        }
    }

    fn person_name(
        field: &'static str,
        value: &str,
        too_short: &'static str,
        too_long: &'static str,
        bad_chars: &'static str,
    ) -> Option<FieldError> {
        let name = sanitize_name(value);
        let len = name.chars().count();
        if len < 2 {
            Some(FieldError::new(field, too_short))
        } else if len > 50 {
            Some(FieldError::new(field, too_long))
        } else if !NAME_RE.is_match(&name) {
            Some(FieldError::new(field, bad_chars))
        } else {
            None
        }
    }

    pub fn first_name(value: &str) -> Option<FieldError> {
        person_name(
            "firstName",
            value,
            "Vorname muss mindestens 2 Zeichen haben",
            "Vorname darf maximal 50 Zeichen haben",
            "Vorname darf nur Buchstaben, Leerzeichen und Bindestriche enthalten",
        )
    }

    pub fn last_name(value: &str) -> Option<FieldError> {
        person_name(
            "lastName",
            value,
            "Nachname muss mindestens 2 Zeichen haben",
            "Nachname darf maximal 50 Zeichen haben",
            "Nachname darf nur Buchstaben, Leerzeichen und Bindestriche enthalten",
        )
    }

    pub fn company(value: Option<&str>) -> Option<FieldError> {
        value.and_then(|company| {
            (sanitize_name(company).chars().count() > 100).then(|| {
                FieldError::new("company", "Firmenname darf maximal 100 Zeichen haben")
            })
        })
    }

    pub fn role(value: Option<&str>) -> Option<FieldError> {
        value.and_then(|role| {
            (sanitize_name(role).chars().count() > 100)
                .then(|| FieldError::new("role", "Position darf maximal 100 Zeichen haben"))
        })
    }

    pub fn stage(value: Option<Stage>) -> Option<FieldError> {
        if value.is_none() {
            Some(FieldError::new(
                "stage",
                "Bitte wählen Sie eine gültige Phase aus",
            ))
        } else {
            None
        }
    }

    pub fn motivation(value: &str) -> Option<FieldError> {
        let len = value.trim().chars().count();
        if len < 10 {
            Some(FieldError::new(
                "motivation",
                "Bitte beschreiben Sie Ihre Motivation (mindestens 10 Zeichen)",
            ))
        } else if len > 1000 {
            Some(FieldError::new(
                "motivation",
                "Motivation darf maximal 1000 Zeichen haben",
            ))
        } else {
            None
        }
    }

    pub fn interests(values: &[Interest]) -> Option<FieldError> {
        if values.is_empty() {
            Some(FieldError::new(
                "interests",
                "Bitte wählen Sie mindestens ein Interesse",
            ))
        } else if values.len() > 6 {
            Some(FieldError::new(
                "interests",
                "Wählen Sie maximal 6 Interessen",
            ))
        } else if values
            .iter()
            .any(|interest| !Interest::CATALOG.contains(interest))
        {
            Some(FieldError::new(
                "interests",
                "Bitte wählen Sie gültige Interessen aus",
            ))
        } else {
            None
        }
    }
}
