use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::{
    app_error::{AppError, AppResult},
    email_templates,
    use_cases::waitlist::ConfirmationSender,
};

/// Sends the registration confirmation email through the Resend API.
#[derive(Clone)]
pub struct ResendConfirmationSender {
    client: Client,
    api_key: secrecy::SecretString,
    from: String,
}

impl ResendConfirmationSender {
    pub fn new(api_key: secrecy::SecretString, from: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
        }
    }
}

#[derive(Serialize)]
struct ResendReq<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl ConfirmationSender for ResendConfirmationSender {
    async fn send_confirmation(
        &self,
        email: &str,
        first_name: &str,
        last_name: Option<&str>,
    ) -> AppResult<()> {
        let (subject, html) = email_templates::confirmation_email(first_name, last_name);
        let body = ResendReq {
            from: &self.from,
            to: [email],
            subject: &subject,
            html: &html,
        };
        self.client
            .post("https://api.resend.com/emails")
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send email: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::Internal(format!("Email API error: {e}")))?;
        Ok(())
    }
}
