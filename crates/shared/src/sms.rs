//! SMS delivery for one-time passwords.
//!
//! The gateway is chosen by configuration: `log` for local development and
//! `http` for a JSON-over-HTTP provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{SmsConfig, SmsProvider};

/// SMS gateway errors.
#[derive(Debug, Error)]
pub enum SmsError {
    /// Gateway is not configured correctly.
    #[error("SMS gateway misconfigured: {0}")]
    Misconfigured(String),
    /// Gateway rejected or failed to deliver the message.
    #[error("Failed to send SMS: {0}")]
    SendError(String),
}

/// Delivers OTP codes to a handset.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Sends `otp` to `mobile`.
    async fn send_otp(&self, mobile: &str, otp: &str) -> Result<(), SmsError>;
}

/// Builds the gateway selected by `config`.
///
/// # Errors
///
/// Returns `SmsError::Misconfigured` when the `http` provider has no endpoint.
pub fn gateway_from_config(config: &SmsConfig) -> Result<Arc<dyn SmsGateway>, SmsError> {
    match config.provider {
        SmsProvider::Log => Ok(Arc::new(LogSmsGateway)),
        SmsProvider::Http => Ok(Arc::new(HttpSmsGateway::new(config)?)),
    }
}

/// Gateway that logs instead of sending.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSmsGateway;

#[async_trait]
impl SmsGateway for LogSmsGateway {
    async fn send_otp(&self, mobile: &str, otp: &str) -> Result<(), SmsError> {
        info!(mobile = %mask_mobile(mobile), "OTP generated (log gateway)");
        debug!(otp = %otp, "Log gateway OTP");
        Ok(())
    }
}

#[derive(Serialize)]
struct SendSmsPayload<'a> {
    to: &'a str,
    sender: &'a str,
    message: String,
}

/// Gateway posting JSON to an HTTP SMS provider.
#[derive(Debug, Clone)]
pub struct HttpSmsGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    sender_id: String,
}

impl HttpSmsGateway {
    /// Creates a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns `SmsError::Misconfigured` if no endpoint is set or the HTTP
    /// client cannot be built.
    pub fn new(config: &SmsConfig) -> Result<Self, SmsError> {
        let endpoint = config
            .endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| SmsError::Misconfigured("sms.endpoint is required".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SmsError::Misconfigured(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            sender_id: config.sender_id.clone(),
        })
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send_otp(&self, mobile: &str, otp: &str) -> Result<(), SmsError> {
        let payload = SendSmsPayload {
            to: mobile,
            sender: &self.sender_id,
            message: format!("{otp} is your Expensa verification code."),
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SmsError::SendError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SmsError::SendError(format!(
                "gateway responded with {}",
                response.status()
            )));
        }

        info!(mobile = %mask_mobile(mobile), "OTP sent");
        Ok(())
    }
}

/// Masks all but the last four digits of a mobile number for logging.
#[must_use]
pub fn mask_mobile(mobile: &str) -> String {
    let count = mobile.chars().count();
    mobile
        .chars()
        .enumerate()
        .map(|(i, c)| if i + 4 < count { '*' } else { c })
        .collect()
}
