//! Nova APNs Payload Library
//!
//! This library builds Apple Push Notification Service (APNs) payloads
//! for iOS and macOS devices across the Nova platform.
//!
//! It handles:
//! - Typed and validated alert/message builders
//! - Field omission rules for the `aps` block
//! - Body-only alerts collapsing to a plain string
//! - Canonical JSON encoding (escaped or raw Unicode)
//! - Packaging id/token/expiry and payload bytes for a delivery channel
//!
//! Connection handling, retries and certificates belong to the transport
//! implementing [`PushChannel`].
pub mod alert;
pub mod config;
pub mod encoding;
pub mod envelope;
pub mod errors;
pub mod message;
mod validate;

pub use alert::{Alert, AlertPayload};
pub use config::{ApnsPayloadConfig, JsonEncoding};
pub use envelope::{Priority, PushChannel, PushEnvelope};
pub use errors::{PayloadError, Result};
pub use message::Message;
