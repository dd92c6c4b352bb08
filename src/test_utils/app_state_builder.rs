//! Test app state builder for HTTP-level integration testing.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::SecretString;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    entities::WaitlistEntry,
    infra::{config::AppConfig, draft_store::DraftStore, rate_limit::SlidingWindowLimiter},
    test_utils::{CapturingConfirmationSender, CapturingProvisioner, InMemoryWaitlistRepo},
    use_cases::{
        admin::AdminUseCases,
        waitlist::{AccountProvisioner, ConfirmationSender, WaitlistRepo, WaitlistUseCases},
    },
};

pub const TEST_ADMIN_TOKEN: &str = "test_admin_token_12345678";

/// Builder for an `AppState` backed by in-memory mocks.
///
/// The rate limiter is permissive by default so unrelated tests never trip
/// it; opt in with `with_rate_limit`.
pub struct TestAppStateBuilder {
    entries: Vec<WaitlistEntry>,
    max_attempts: usize,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            entries: vec![],
            max_attempts: usize::MAX,
        }
    }

    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_rate_limit(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_mocks().0
    }

    /// Build the state and hand back the mocks for assertions.
    pub fn build_with_mocks(
        self,
    ) -> (
        AppState,
        Arc<InMemoryWaitlistRepo>,
        Arc<CapturingProvisioner>,
        Arc<CapturingConfirmationSender>,
    ) {
        let repo = Arc::new(InMemoryWaitlistRepo::with_entries(self.entries));
        let provisioner = Arc::new(CapturingProvisioner::default());
        let confirmations = Arc::new(CapturingConfirmationSender::default());
        let limiter = Arc::new(SlidingWindowLimiter::new(
            self.max_attempts,
            Duration::from_secs(60),
        ));

        let waitlist_use_cases = Arc::new(WaitlistUseCases::new(
            repo.clone() as Arc<dyn WaitlistRepo>,
            provisioner.clone() as Arc<dyn AccountProvisioner>,
            confirmations.clone() as Arc<dyn ConfirmationSender>,
            limiter,
        ));
        let admin_use_cases = Arc::new(AdminUseCases::new(repo.clone() as Arc<dyn WaitlistRepo>));

        let config = Arc::new(AppConfig {
            bind_addr: "127.0.0.1:3001".parse().unwrap(),
            database_url: String::new(),
            app_origin: Url::parse("http://localhost:3000").unwrap(),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            resend_api_key: SecretString::new("test_resend_key".into()),
            email_from: "Munich Funding Summit <summit@test.local>".to_string(),
            auth_service_url: Url::parse("http://auth.test.local").unwrap(),
            auth_service_key: SecretString::new("test_auth_key".into()),
            admin_token: SecretString::new(TEST_ADMIN_TOKEN.into()),
            rate_limit_max_attempts: self.max_attempts,
            rate_limit_window: Duration::from_secs(60),
            draft_ttl: Duration::from_secs(1800),
        });

        let app_state = AppState {
            config,
            waitlist_use_cases,
            admin_use_cases,
            drafts: Arc::new(DraftStore::new(Duration::from_secs(1800))),
        };

        (app_state, repo, provisioner, confirmations)
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
