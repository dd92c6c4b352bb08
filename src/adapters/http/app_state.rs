use std::sync::Arc;

use crate::{
    infra::{config::AppConfig, draft_store::DraftStore},
    use_cases::{admin::AdminUseCases, waitlist::WaitlistUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub waitlist_use_cases: Arc<WaitlistUseCases>,
    pub admin_use_cases: Arc<AdminUseCases>,
    pub drafts: Arc<DraftStore>,
}
