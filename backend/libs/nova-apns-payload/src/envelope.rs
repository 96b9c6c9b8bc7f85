use tracing::debug;

use crate::config::ApnsPayloadConfig;
use crate::errors::{PayloadError, Result};
use crate::message::Message;

/// APNs Notification Priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Immediate delivery
    High,
    /// Background delivery
    Low,
}

impl Priority {
    /// Value of the `apns-priority` request header
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "10",
            Priority::Low => "5",
        }
    }
}

/// Everything the delivery channel needs to send one notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEnvelope {
    pub id: Option<String>,
    pub token: String,
    pub expire: Option<i64>,
    pub priority: Option<Priority>,
    /// Encoded JSON payload body
    pub payload: Vec<u8>,
}

impl PushEnvelope {
    /// Encodes `message` and checks it against the configured size limit
    ///
    /// # Returns
    /// `Err(PayloadError::MissingToken)` if the message has no token,
    /// `Err(PayloadError::InvalidArgument)` if the token is not hexadecimal,
    /// `Err(PayloadError::PayloadTooLarge)` if the encoded body exceeds
    /// `config.max_payload_bytes`
    pub fn build(message: &Message, config: &ApnsPayloadConfig) -> Result<Self> {
        let token = message.token().ok_or(PayloadError::MissingToken)?;
        validate_token(token)?;

        let payload = message.payload_json(config)?.into_bytes();
        if payload.len() > config.max_payload_bytes {
            return Err(PayloadError::PayloadTooLarge {
                size: payload.len(),
                limit: config.max_payload_bytes,
            });
        }

        let token_prefix = token.chars().take(8).collect::<String>();
        debug!(
            "Built APNs envelope for token {} ({} bytes)",
            token_prefix,
            payload.len()
        );

        Ok(Self {
            id: message.id().map(str::to_string),
            token: token.to_string(),
            expire: message.expire(),
            priority: message.priority(),
            payload,
        })
    }
}

/// Validate device token format
pub fn validate_token(device_token: &str) -> Result<()> {
    if device_token.is_empty() {
        return Err(PayloadError::invalid("token", "device token is empty"));
    }

    if !device_token.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PayloadError::invalid(
            "token",
            "device token must be hexadecimal",
        ));
    }

    Ok(())
}

/// Trait for transports that deliver finished envelopes
#[async_trait::async_trait]
pub trait PushChannel: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Hands one envelope to the transport
    ///
    /// # Returns
    /// `Ok(())` if the transport accepted the notification
    async fn deliver(&self, envelope: PushEnvelope) -> std::result::Result<(), Self::Error>;
}
