use serde::Serialize;
use thiserror::Error;

/// Classification of errors reported by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    UniqueViolation,
    CheckViolation,
    /// A point lookup found nothing. Expected during the pre-insert
    /// existence check and never surfaced as an error.
    NoRows,
    Other,
}

/// User-facing message per store error class. `NoRows` intentionally maps to
/// an empty message: a miss during the existence check is not an error.
const STORE_ERROR_MESSAGES: [(StoreErrorKind, &str); 4] = [
    (
        StoreErrorKind::UniqueViolation,
        "Diese E-Mail-Adresse ist bereits registriert!",
    ),
    (
        StoreErrorKind::CheckViolation,
        "Ungültige Eingabedaten. Bitte überprüfen Sie Ihre Angaben.",
    ),
    (StoreErrorKind::NoRows, ""),
    (
        StoreErrorKind::Other,
        "Ein Fehler ist aufgetreten. Bitte versuchen Sie es später erneut.",
    ),
];

impl StoreErrorKind {
    pub fn user_message(self) -> &'static str {
        STORE_ERROR_MESSAGES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, message)| *message)
            .unwrap_or_default()
    }
}

/// A single failed field check, surfaced to the form next to its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bitte geben Sie eine gültige E-Mail-Adresse ein")]
    InvalidEmail,

    #[error("Ungültige Eingabedaten. Bitte überprüfen Sie Ihre Angaben.")]
    Validation(Vec<FieldError>),

    #[error("Zu viele Versuche. Bitte warten Sie {retry_after_secs} Sekunden.")]
    RateLimited { retry_after_secs: u64 },

    #[error("Diese E-Mail-Adresse ist bereits registriert! Sie erhalten bereits Updates.")]
    AlreadyRegistered,

    #[error("Ein Fehler beim Überprüfen der Daten ist aufgetreten.")]
    CheckFailed,

    #[error("{}", .0.user_message())]
    Store(StoreErrorKind),

    #[error("Kein aktiver Anmeldevorgang gefunden")]
    DraftNotFound,

    #[error("Invalid admin credentials")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
