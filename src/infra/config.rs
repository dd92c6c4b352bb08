use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use url::Url;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Public origin of the marketing site, used in CORS and email copy.
    pub app_origin: Url,
    pub cors_origin: HeaderValue,
    pub resend_api_key: SecretString,
    pub email_from: String,
    /// Base URL of the external auth service used for best-effort account
    /// provisioning on quick signups.
    pub auth_service_url: Url,
    pub auth_service_key: SecretString,
    /// Static bearer token guarding the admin routes.
    pub admin_token: SecretString,
    pub rate_limit_max_attempts: usize,
    pub rate_limit_window: Duration,
    pub draft_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:3001".parse().unwrap());
        let database_url: String = get_env("DATABASE_URL");
        let app_origin: Url = get_env("APP_ORIGIN");
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let resend_api_key = SecretString::new(get_env::<String>("RESEND_API_KEY").into());
        let email_from: String = get_env("EMAIL_FROM");

        let auth_service_url: Url = get_env("AUTH_SERVICE_URL");
        let auth_service_key = SecretString::new(get_env::<String>("AUTH_SERVICE_KEY").into());

        let admin_token = SecretString::new(get_env::<String>("ADMIN_TOKEN").into());

        let rate_limit_max_attempts: usize = get_env_default("RATE_LIMIT_MAX_ATTEMPTS", 3);
        let rate_limit_window_secs: u64 = get_env_default("RATE_LIMIT_WINDOW_SECS", 60);
        let draft_ttl_minutes: u64 = get_env_default("WIZARD_DRAFT_TTL_MINUTES", 30);

        Self {
            bind_addr,
            database_url,
            app_origin,
            cors_origin,
            resend_api_key,
            email_from,
            auth_service_url,
            auth_service_key,
            admin_token,
            rate_limit_max_attempts,
            rate_limit_window: Duration::from_secs(rate_limit_window_secs),
            draft_ttl: Duration::from_secs(draft_ttl_minutes * 60),
        }
    }
}
