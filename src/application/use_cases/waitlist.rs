use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use tracing::instrument;

use crate::app_error::{AppError, AppResult, StoreErrorKind};
use crate::entities::{NewWaitlistEntry, WaitlistEntry};
use crate::infra::rate_limit::SlidingWindowLimiter;
use crate::validators::{sanitize_email, validate_email};
use crate::wizard::DetailedSignup;

/// The external record store, keyed by normalized email. The store's own
/// unique constraint is the authoritative duplicate check; `exists_by_email`
/// is a pre-insert courtesy only.
#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;
    async fn insert(&self, entry: NewWaitlistEntry) -> AppResult<WaitlistEntry>;
    /// All entries, newest first.
    async fn list_all(&self) -> AppResult<Vec<WaitlistEntry>>;
}

/// Best-effort account creation with the external auth service. The
/// credential is random, never stored and never shown to anyone.
#[async_trait]
pub trait AccountProvisioner: Send + Sync {
    async fn provision(&self, email: &str, credential: &str) -> AppResult<()>;
}

/// Best-effort confirmation email trigger.
#[async_trait]
pub trait ConfirmationSender: Send + Sync {
    async fn send_confirmation(
        &self,
        email: &str,
        first_name: &str,
        last_name: Option<&str>,
    ) -> AppResult<()>;
}

pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    provisioner: Arc<dyn AccountProvisioner>,
    confirmations: Arc<dyn ConfirmationSender>,
    limiter: Arc<SlidingWindowLimiter>,
}

impl WaitlistUseCases {
    pub fn new(
        repo: Arc<dyn WaitlistRepo>,
        provisioner: Arc<dyn AccountProvisioner>,
        confirmations: Arc<dyn ConfirmationSender>,
        limiter: Arc<SlidingWindowLimiter>,
    ) -> Self {
        Self {
            repo,
            provisioner,
            confirmations,
            limiter,
        }
    }

    /// Email-only signup: stores a newsletter-only entry and provisions an
    /// account for the address on a best-effort basis.
    #[instrument(skip(self))]
    pub async fn quick_signup(&self, email: &str) -> AppResult<WaitlistEntry> {
        let email = sanitize_email(email);
        if !validate_email(&email) {
            return Err(AppError::InvalidEmail);
        }
        self.guard(&email)?;
        self.ensure_not_registered(&email).await?;

        let credential = generate_credential();
        if let Err(err) = self.provisioner.provision(&email, &credential).await {
            tracing::warn!(error = ?err, "account provisioning failed, continuing with registration");
        }

        let entry = self
            .insert_entry(NewWaitlistEntry::newsletter_only(email))
            .await?;
        self.send_confirmation_best_effort(&entry).await;
        Ok(entry)
    }

    /// Full signup from a finished wizard draft. Same pipeline as the quick
    /// path minus the account provisioning, with the full payload.
    #[instrument(skip(self, signup))]
    pub async fn detailed_signup(&self, signup: DetailedSignup) -> AppResult<WaitlistEntry> {
        let errors = signup.field_errors();
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let email = sanitize_email(&signup.email);
        self.guard(&email)?;
        self.ensure_not_registered(&email).await?;

        let entry = self
            .insert_entry(NewWaitlistEntry {
                email,
                first_name: signup.first_name,
                last_name: signup.last_name,
                company: signup.company,
                role: signup.role,
                stage: signup.stage,
                motivation: signup.motivation,
                interests: signup.interests,
                newsletter: signup.newsletter,
            })
            .await?;
        self.send_confirmation_best_effort(&entry).await;
        Ok(entry)
    }

    /// Rate-limit gate. The attempt is recorded as soon as the gate passes,
    /// before any store call, so failed store operations still count toward
    /// the window.
    fn guard(&self, email: &str) -> AppResult<()> {
        if !self.limiter.can_submit(email) {
            let remaining = self.limiter.remaining_time(email);
            return Err(AppError::RateLimited {
                retry_after_secs: remaining.as_secs_f64().ceil() as u64,
            });
        }
        self.limiter.record_attempt(email);
        Ok(())
    }

    async fn ensure_not_registered(&self, email: &str) -> AppResult<()> {
        match self.repo.exists_by_email(email).await {
            Ok(true) => Err(AppError::AlreadyRegistered),
            Ok(false) => Ok(()),
            // A miss reported as an error class is still a miss.
            Err(AppError::Store(StoreErrorKind::NoRows)) => Ok(()),
            Err(err) => {
                tracing::error!(error = ?err, "existence check failed");
                Err(AppError::CheckFailed)
            }
        }
    }

    async fn insert_entry(&self, entry: NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        match self.repo.insert(entry).await {
            // The unique index catching a race is the authoritative
            // duplicate signal.
            Err(AppError::Store(StoreErrorKind::UniqueViolation)) => {
                Err(AppError::AlreadyRegistered)
            }
            other => other,
        }
    }

    async fn send_confirmation_best_effort(&self, entry: &WaitlistEntry) {
        let last_name = (!entry.last_name.is_empty()).then_some(entry.last_name.as_str());
        if let Err(err) = self
            .confirmations
            .send_confirmation(&entry.email, &entry.first_name, last_name)
            .await
        {
            tracing::warn!(error = ?err, email = %entry.email, "confirmation email failed");
        }
    }
}

fn generate_credential() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
