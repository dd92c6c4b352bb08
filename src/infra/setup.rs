use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        auth::service::AuthServiceClient, email::resend::ResendConfirmationSender,
        http::app_state::AppState,
    },
    infra::{
        config::AppConfig, draft_store::DraftStore, postgres_persistence,
        rate_limit::SlidingWindowLimiter,
    },
    use_cases::{
        admin::AdminUseCases,
        waitlist::{AccountProvisioner, ConfirmationSender, WaitlistRepo, WaitlistUseCases},
    },
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);

    let confirmations = Arc::new(ResendConfirmationSender::new(
        config.resend_api_key.clone(),
        config.email_from.clone(),
    ));
    let provisioner = Arc::new(AuthServiceClient::new(
        config.auth_service_url.clone(),
        config.auth_service_key.clone(),
    ));
    let limiter = Arc::new(SlidingWindowLimiter::new(
        config.rate_limit_max_attempts,
        config.rate_limit_window,
    ));

    let waitlist_use_cases = WaitlistUseCases::new(
        postgres_arc.clone() as Arc<dyn WaitlistRepo>,
        provisioner as Arc<dyn AccountProvisioner>,
        confirmations as Arc<dyn ConfirmationSender>,
        limiter,
    );
    let admin_use_cases = AdminUseCases::new(postgres_arc as Arc<dyn WaitlistRepo>);

    let drafts = Arc::new(DraftStore::new(config.draft_ttl));

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
        admin_use_cases: Arc::new(admin_use_cases),
        drafts,
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "summit_waitlist=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer().with_target(false).with_level(true).pretty();

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
