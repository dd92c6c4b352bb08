//! In-memory mock implementations of the waitlist collaborator traits,
//! used by use-case and HTTP-level tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult, StoreErrorKind},
    entities::{
        Interest, NEWSLETTER_SIGNUP_MOTIVATION, NewWaitlistEntry, Stage, WaitlistEntry,
    },
    use_cases::waitlist::{AccountProvisioner, ConfirmationSender, WaitlistRepo},
};

/// Create a test waitlist entry with quick-signup defaults.
pub fn test_entry(overrides: impl FnOnce(&mut WaitlistEntry)) -> WaitlistEntry {
    let mut entry = WaitlistEntry {
        id: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        company: None,
        role: None,
        stage: Stage::Other,
        motivation: NEWSLETTER_SIGNUP_MOTIVATION.to_string(),
        interests: vec![Interest::Newsletter],
        newsletter: true,
        created_at: Utc::now(),
    };
    overrides(&mut entry);
    entry
}

/// In-memory implementation of `WaitlistRepo`. Enforces the email unique
/// constraint the way the real store does, and can be told to fail its
/// operations with a given store error class.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    entries: Mutex<Vec<WaitlistEntry>>,
    fail_exists: Mutex<Option<StoreErrorKind>>,
    fail_insert: Mutex<Option<StoreErrorKind>>,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn entries(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn fail_existence_checks_with(&self, kind: StoreErrorKind) {
        *self.fail_exists.lock().unwrap() = Some(kind);
    }

    pub fn fail_inserts_with(&self, kind: StoreErrorKind) {
        *self.fail_insert.lock().unwrap() = Some(kind);
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        if let Some(kind) = *self.fail_exists.lock().unwrap() {
            return Err(AppError::Store(kind));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .any(|entry| entry.email == email))
    }

    async fn insert(&self, entry: NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        if let Some(kind) = *self.fail_insert.lock().unwrap() {
            return Err(AppError::Store(kind));
        }
        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|existing| existing.email == entry.email) {
            return Err(AppError::Store(StoreErrorKind::UniqueViolation));
        }

        let stored = WaitlistEntry {
            id: Uuid::new_v4(),
            email: entry.email,
            first_name: entry.first_name,
            last_name: entry.last_name,
            company: entry.company,
            role: entry.role,
            stage: entry.stage,
            motivation: entry.motivation,
            interests: entry.interests,
            newsletter: entry.newsletter,
            created_at: Utc::now(),
        };
        entries.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> AppResult<Vec<WaitlistEntry>> {
        // Insertion order is chronological; newest first means reversed.
        Ok(self.entries.lock().unwrap().iter().rev().cloned().collect())
    }
}

/// Records provisioning calls; can be told to fail the next one.
#[derive(Default)]
pub struct CapturingProvisioner {
    provisioned: Mutex<Vec<(String, String)>>,
    fail_next: AtomicBool,
}

impl CapturingProvisioner {
    pub fn provisioned(&self) -> Vec<(String, String)> {
        self.provisioned.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AccountProvisioner for CapturingProvisioner {
    async fn provision(&self, email: &str, credential: &str) -> AppResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::Internal("auth service unavailable".into()));
        }
        self.provisioned
            .lock()
            .unwrap()
            .push((email.to_string(), credential.to_string()));
        Ok(())
    }
}

/// Records confirmation emails; can be told to fail the next one.
#[derive(Default)]
pub struct CapturingConfirmationSender {
    sent: Mutex<Vec<(String, String, Option<String>)>>,
    fail_next: AtomicBool,
}

impl CapturingConfirmationSender {
    pub fn sent(&self) -> Vec<(String, String, Option<String>)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConfirmationSender for CapturingConfirmationSender {
    async fn send_confirmation(
        &self,
        email: &str,
        first_name: &str,
        last_name: Option<&str>,
    ) -> AppResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::Internal("email api unavailable".into()));
        }
        self.sent.lock().unwrap().push((
            email.to_string(),
            first_name.to_string(),
            last_name.map(str::to_string),
        ));
        Ok(())
    }
}
