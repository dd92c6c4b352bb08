use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::waitlist::AccountProvisioner,
};

/// Creates an account with the external auth service so registrants can sign
/// in later. The caller treats every failure as non-fatal; the generated
/// password is throwaway and never surfaced.
#[derive(Clone)]
pub struct AuthServiceClient {
    client: Client,
    base_url: Url,
    api_key: secrecy::SecretString,
}

impl AuthServiceClient {
    pub fn new(base_url: Url, api_key: secrecy::SecretString) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct SignupReq<'a> {
    email: &'a str,
    password: &'a str,
}

#[async_trait]
impl AccountProvisioner for AuthServiceClient {
    async fn provision(&self, email: &str, credential: &str) -> AppResult<()> {
        let url = self
            .base_url
            .join("signup")
            .map_err(|e| AppError::Internal(format!("Bad auth service URL: {e}")))?;
        let body = SignupReq {
            email,
            password: credential,
        };
        self.client
            .post(url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reach auth service: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::Internal(format!("Auth service error: {e}")))?;
        Ok(())
    }
}
