//! A single APNs notification and its payload assembly

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use crate::alert::Alert;
use crate::config::ApnsPayloadConfig;
use crate::encoding;
use crate::envelope::{Priority, PushEnvelope};
use crate::errors::{PayloadError, Result};
use crate::validate;

/// Reserved top-level key holding the system-recognized fields
pub const APS: &str = "aps";

pub const ALERT: &str = "alert";
pub const BADGE: &str = "badge";
pub const SOUND: &str = "sound";
pub const CONTENT_AVAILABLE: &str = "content-available";
pub const MUTABLE_CONTENT: &str = "mutable-content";
pub const CATEGORY: &str = "category";
pub const URL_ARGS: &str = "url-args";
pub const EXPIRE: &str = "expire";
pub const CUSTOM: &str = "custom";

/// APNs notification message
///
/// `id`, `token`, `expire` and `priority` are delivery metadata and never
/// appear in the payload body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    id: Option<String>,
    token: Option<String>,
    alert: Option<Alert>,
    badge: Option<u32>,
    mutable_content: Option<u32>,
    expire: Option<i64>,
    sound: Option<String>,
    content_available: Option<u32>,
    category: Option<String>,
    url_args: Option<Vec<String>>,
    custom: Option<Map<String, Value>>,
    priority: Option<Priority>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    /// Assign a fresh UUID v4 identifier
    pub fn set_random_id(&mut self) -> &mut Self {
        self.id = Some(Uuid::new_v4().to_string());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.token = Some(token.into());
        self
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Set the alert; plain text becomes a body-only [`Alert`]
    pub fn set_alert(&mut self, alert: impl Into<Alert>) -> &mut Self {
        self.alert = Some(alert.into());
        self
    }

    /// Set the alert from untyped input: a string, an alert object, or null
    pub fn try_set_alert(&mut self, value: &Value) -> Result<&mut Self> {
        self.alert = match value {
            Value::Null => None,
            Value::String(_) | Value::Object(_) => Some(Alert::try_from(value)?),
            other => return Err(validate::reject(ALERT, "a string or an alert object", other)),
        };
        Ok(self)
    }

    pub fn badge(&self) -> Option<u32> {
        self.badge
    }

    /// Set the badge count; `None` is stored as zero
    pub fn set_badge(&mut self, badge: Option<u32>) -> &mut Self {
        self.badge = Some(badge.unwrap_or(0));
        self
    }

    pub fn try_set_badge(&mut self, value: &Value) -> Result<&mut Self> {
        self.badge = Some(validate::counter_or_zero(BADGE, value)?);
        Ok(self)
    }

    pub fn mutable_content(&self) -> Option<u32> {
        self.mutable_content
    }

    /// Set the mutable-content flag; `None` is stored as zero
    pub fn set_mutable_content(&mut self, flag: Option<u32>) -> &mut Self {
        self.mutable_content = Some(flag.unwrap_or(0));
        self
    }

    pub fn try_set_mutable_content(&mut self, value: &Value) -> Result<&mut Self> {
        self.mutable_content = Some(validate::counter_or_zero(MUTABLE_CONTENT, value)?);
        Ok(self)
    }

    /// Unix timestamp after which APNs discards the notification
    pub fn expire(&self) -> Option<i64> {
        self.expire
    }

    pub fn set_expire(&mut self, expire: i64) -> &mut Self {
        self.expire = Some(expire);
        self
    }

    pub fn set_expire_at(&mut self, at: DateTime<Utc>) -> &mut Self {
        self.set_expire(at.timestamp())
    }

    pub fn try_set_expire(&mut self, value: &Value) -> Result<&mut Self> {
        self.expire = Some(validate::numeric(EXPIRE, value)?);
        Ok(self)
    }

    pub fn sound(&self) -> Option<&str> {
        self.sound.as_deref()
    }

    pub fn set_sound(&mut self, sound: impl Into<String>) -> &mut Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn try_set_sound(&mut self, value: &Value) -> Result<&mut Self> {
        self.sound = validate::optional_string(SOUND, value)?;
        Ok(self)
    }

    pub fn content_available(&self) -> Option<u32> {
        self.content_available
    }

    pub fn set_content_available(&mut self, flag: u32) -> &mut Self {
        self.content_available = Some(flag);
        self
    }

    pub fn try_set_content_available(&mut self, value: &Value) -> Result<&mut Self> {
        self.content_available = Some(validate::strict_flag(CONTENT_AVAILABLE, value)?);
        Ok(self)
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> &mut Self {
        self.category = Some(category.into());
        self
    }

    pub fn try_set_category(&mut self, value: &Value) -> Result<&mut Self> {
        self.category = validate::optional_string(CATEGORY, value)?;
        Ok(self)
    }

    pub fn url_args(&self) -> Option<&[String]> {
        self.url_args.as_deref()
    }

    pub fn set_url_args(&mut self, args: Vec<String>) -> &mut Self {
        self.url_args = Some(args);
        self
    }

    pub fn try_set_url_args(&mut self, value: &Value) -> Result<&mut Self> {
        self.url_args = validate::optional_string_list(URL_ARGS, value)?;
        Ok(self)
    }

    pub fn custom(&self) -> Option<&Map<String, Value>> {
        self.custom.as_ref()
    }

    /// Set caller-defined top-level payload data
    ///
    /// Keys are merged next to `aps` without collision checks; a custom
    /// `aps` key replaces the generated block.
    pub fn set_custom(&mut self, custom: Map<String, Value>) -> &mut Self {
        self.custom = Some(custom);
        self
    }

    /// Set custom data from any serializable value that encodes to a JSON object
    pub fn set_custom_data<T>(&mut self, data: &T) -> Result<&mut Self>
    where
        T: ?Sized + Serialize,
    {
        let value = serde_json::to_value(data)?;
        self.try_set_custom(&value)
    }

    pub fn try_set_custom(&mut self, value: &Value) -> Result<&mut Self> {
        self.custom = match value {
            Value::Null => None,
            Value::Object(map) => Some(map.clone()),
            other => return Err(validate::reject(CUSTOM, "an object", other)),
        };
        Ok(self)
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) -> &mut Self {
        self.priority = Some(priority);
        self
    }

    fn aps(&self) -> Map<String, Value> {
        let mut aps = Map::new();

        if let Some(alert) = self.alert.as_ref().filter(|alert| !alert.is_empty()) {
            aps.insert(ALERT.to_string(), alert.payload().into());
        }
        if let Some(badge) = self.badge {
            aps.insert(BADGE.to_string(), badge.into());
        }
        if let Some(sound) = &self.sound {
            aps.insert(SOUND.to_string(), sound.clone().into());
        }
        if let Some(flag) = self.content_available {
            aps.insert(CONTENT_AVAILABLE.to_string(), flag.into());
        }
        if let Some(flag) = self.mutable_content {
            aps.insert(MUTABLE_CONTENT.to_string(), flag.into());
        }
        if let Some(category) = &self.category {
            aps.insert(CATEGORY.to_string(), category.clone().into());
        }
        if let Some(args) = &self.url_args {
            aps.insert(URL_ARGS.to_string(), args.clone().into());
        }

        aps
    }

    /// Assemble the top-level payload mapping
    pub fn payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();

        let aps = self.aps();
        if !aps.is_empty() {
            payload.insert(APS.to_string(), Value::Object(aps));
        }

        if let Some(custom) = &self.custom {
            if custom.contains_key(APS) {
                warn!("custom data key '{}' replaces the generated aps block", APS);
            }
            for (key, value) in custom {
                payload.insert(key.clone(), value.clone());
            }
        }

        payload
    }

    /// Payload as JSON text, encoded with `config.json_encoding`
    ///
    /// The envelope body is built from this same text, so both always agree.
    pub fn payload_json(&self, config: &ApnsPayloadConfig) -> Result<String> {
        encoding::to_json_string(&self.payload(), config.json_encoding)
    }

    /// Package this message for the delivery channel
    pub fn envelope(&self, config: &ApnsPayloadConfig) -> Result<PushEnvelope> {
        PushEnvelope::build(self, config)
    }
}

impl TryFrom<&Value> for Message {
    type Error = PayloadError;

    /// Reads a payload mapping back into a message; unknown top-level keys
    /// become custom data
    fn try_from(value: &Value) -> Result<Self> {
        let top = match value {
            Value::Object(top) => top,
            other => return Err(validate::reject("payload", "an object", other)),
        };

        let mut message = Message::new();
        let mut custom = Map::new();
        for (key, value) in top {
            if key != APS {
                custom.insert(key.clone(), value.clone());
                continue;
            }
            let aps = match value {
                Value::Object(aps) => aps,
                other => return Err(validate::reject(APS, "an object", other)),
            };
            for (field, value) in aps {
                match field.as_str() {
                    ALERT => message.try_set_alert(value)?,
                    BADGE => message.try_set_badge(value)?,
                    SOUND => message.try_set_sound(value)?,
                    CONTENT_AVAILABLE => message.try_set_content_available(value)?,
                    MUTABLE_CONTENT => message.try_set_mutable_content(value)?,
                    CATEGORY => message.try_set_category(value)?,
                    URL_ARGS => message.try_set_url_args(value)?,
                    unknown => {
                        return Err(PayloadError::invalid(
                            APS,
                            format!("unknown aps key '{}'", unknown),
                        ))
                    }
                };
            }
        }
        if !custom.is_empty() {
            message.set_custom(custom);
        }
        Ok(message)
    }
}
