//! User-visible alert content of a notification
//!
//! An [`Alert`] serializes either to a bare string (when only the body is
//! set) or to an object holding just the attributes that were set.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{PayloadError, Result};
use crate::validate;

pub const BODY: &str = "body";
pub const ACTION_LOC_KEY: &str = "action-loc-key";
pub const LOC_KEY: &str = "loc-key";
pub const LOC_ARGS: &str = "loc-args";
pub const LAUNCH_IMAGE: &str = "launch-image";
pub const TITLE: &str = "title";
pub const TITLE_LOC_KEY: &str = "title-loc-key";
pub const TITLE_LOC_ARGS: &str = "title-loc-args";

/// Serialized form of an [`Alert`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AlertPayload {
    /// Body-only alert collapsed to a plain string
    Text(String),
    /// Object with one entry per attribute that is set
    Fields(Map<String, Value>),
}

impl AlertPayload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AlertPayload::Text(text) => Some(text),
            AlertPayload::Fields(_) => None,
        }
    }

    pub fn as_fields(&self) -> Option<&Map<String, Value>> {
        match self {
            AlertPayload::Text(_) => None,
            AlertPayload::Fields(fields) => Some(fields),
        }
    }
}

impl From<AlertPayload> for Value {
    fn from(payload: AlertPayload) -> Self {
        match payload {
            AlertPayload::Text(text) => Value::String(text),
            AlertPayload::Fields(fields) => Value::Object(fields),
        }
    }
}

/// APNs alert dictionary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alert {
    body: Option<String>,
    action_loc_key: Option<String>,
    loc_key: Option<String>,
    loc_args: Option<Vec<String>>,
    launch_image: Option<String>,
    title: Option<String>,
    title_loc_key: Option<String>,
    title_loc_args: Option<Vec<String>>,
}

impl Alert {
    /// Create an alert with every attribute given positionally
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        body: Option<String>,
        action_loc_key: Option<String>,
        loc_key: Option<String>,
        loc_args: Option<Vec<String>>,
        launch_image: Option<String>,
        title: Option<String>,
        title_loc_key: Option<String>,
        title_loc_args: Option<Vec<String>>,
    ) -> Self {
        Self {
            body,
            action_loc_key,
            loc_key,
            loc_args,
            launch_image,
            title,
            title_loc_key,
            title_loc_args,
        }
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    pub fn try_set_body(&mut self, value: &Value) -> Result<&mut Self> {
        self.body = validate::optional_string(BODY, value)?;
        Ok(self)
    }

    pub fn action_loc_key(&self) -> Option<&str> {
        self.action_loc_key.as_deref()
    }

    pub fn set_action_loc_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.action_loc_key = Some(key.into());
        self
    }

    pub fn try_set_action_loc_key(&mut self, value: &Value) -> Result<&mut Self> {
        self.action_loc_key = validate::optional_string(ACTION_LOC_KEY, value)?;
        Ok(self)
    }

    pub fn loc_key(&self) -> Option<&str> {
        self.loc_key.as_deref()
    }

    pub fn set_loc_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.loc_key = Some(key.into());
        self
    }

    pub fn try_set_loc_key(&mut self, value: &Value) -> Result<&mut Self> {
        self.loc_key = validate::optional_string(LOC_KEY, value)?;
        Ok(self)
    }

    pub fn loc_args(&self) -> Option<&[String]> {
        self.loc_args.as_deref()
    }

    pub fn set_loc_args(&mut self, args: Vec<String>) -> &mut Self {
        self.loc_args = Some(args);
        self
    }

    pub fn try_set_loc_args(&mut self, value: &Value) -> Result<&mut Self> {
        self.loc_args = validate::optional_string_list(LOC_ARGS, value)?;
        Ok(self)
    }

    pub fn launch_image(&self) -> Option<&str> {
        self.launch_image.as_deref()
    }

    pub fn set_launch_image(&mut self, image: impl Into<String>) -> &mut Self {
        self.launch_image = Some(image.into());
        self
    }

    pub fn try_set_launch_image(&mut self, value: &Value) -> Result<&mut Self> {
        self.launch_image = validate::optional_string(LAUNCH_IMAGE, value)?;
        Ok(self)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn try_set_title(&mut self, value: &Value) -> Result<&mut Self> {
        self.title = validate::optional_string(TITLE, value)?;
        Ok(self)
    }

    pub fn title_loc_key(&self) -> Option<&str> {
        self.title_loc_key.as_deref()
    }

    pub fn set_title_loc_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.title_loc_key = Some(key.into());
        self
    }

    pub fn try_set_title_loc_key(&mut self, value: &Value) -> Result<&mut Self> {
        self.title_loc_key = validate::optional_string(TITLE_LOC_KEY, value)?;
        Ok(self)
    }

    pub fn title_loc_args(&self) -> Option<&[String]> {
        self.title_loc_args.as_deref()
    }

    pub fn set_title_loc_args(&mut self, args: Vec<String>) -> &mut Self {
        self.title_loc_args = Some(args);
        self
    }

    pub fn try_set_title_loc_args(&mut self, value: &Value) -> Result<&mut Self> {
        self.title_loc_args = validate::optional_string_list(TITLE_LOC_ARGS, value)?;
        Ok(self)
    }

    /// True when no attribute is set
    pub fn is_empty(&self) -> bool {
        *self == Alert::default()
    }

    fn is_body_only(&self) -> bool {
        Alert {
            body: None,
            ..self.clone()
        }
        .is_empty()
    }

    /// Build the wire form of this alert
    ///
    /// A body-only alert collapses to [`AlertPayload::Text`]; an alert with
    /// nothing set yields an empty text value.
    pub fn payload(&self) -> AlertPayload {
        if self.is_body_only() {
            return AlertPayload::Text(self.body.clone().unwrap_or_default());
        }

        let mut fields = Map::new();
        let strings = [
            (BODY, &self.body),
            (ACTION_LOC_KEY, &self.action_loc_key),
            (LOC_KEY, &self.loc_key),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                fields.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        if let Some(args) = &self.loc_args {
            fields.insert(LOC_ARGS.to_string(), string_array(args));
        }
        let strings = [
            (LAUNCH_IMAGE, &self.launch_image),
            (TITLE, &self.title),
            (TITLE_LOC_KEY, &self.title_loc_key),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                fields.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        if let Some(args) = &self.title_loc_args {
            fields.insert(TITLE_LOC_ARGS.to_string(), string_array(args));
        }
        AlertPayload::Fields(fields)
    }
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

impl From<&str> for Alert {
    fn from(body: &str) -> Self {
        Alert {
            body: Some(body.to_string()),
            ..Default::default()
        }
    }
}

impl From<String> for Alert {
    fn from(body: String) -> Self {
        Alert {
            body: Some(body),
            ..Default::default()
        }
    }
}

/// Reads an alert back from its wire form, validating every attribute
impl TryFrom<&Value> for Alert {
    type Error = PayloadError;

    fn try_from(value: &Value) -> Result<Self> {
        let fields = match value {
            Value::String(body) => return Ok(Alert::from(body.as_str())),
            Value::Object(fields) => fields,
            other => return Err(validate::reject("alert", "a string or an object", other)),
        };

        let mut alert = Alert::default();
        for (key, value) in fields {
            match key.as_str() {
                BODY => alert.try_set_body(value)?,
                ACTION_LOC_KEY => alert.try_set_action_loc_key(value)?,
                LOC_KEY => alert.try_set_loc_key(value)?,
                LOC_ARGS => alert.try_set_loc_args(value)?,
                LAUNCH_IMAGE => alert.try_set_launch_image(value)?,
                TITLE => alert.try_set_title(value)?,
                TITLE_LOC_KEY => alert.try_set_title_loc_key(value)?,
                TITLE_LOC_ARGS => alert.try_set_title_loc_args(value)?,
                unknown => {
                    return Err(PayloadError::invalid(
                        "alert",
                        format!("unknown alert key '{}'", unknown),
                    ))
                }
            };
        }
        Ok(alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_alert_yields_empty_text() {
        let alert = Alert::default();
        assert!(alert.is_empty());
        assert_eq!(alert.payload(), AlertPayload::Text(String::new()));
    }

    #[test]
    fn test_body_only_collapses_to_text() {
        let alert = Alert::from("Foo wants Bar");
        assert_eq!(alert.payload().as_text(), Some("Foo wants Bar"));
    }

    #[test]
    fn test_title_forces_object_form() {
        let mut alert = Alert::from("Body");
        alert.set_title("Heading");
        let payload = Value::from(alert.payload());
        assert_eq!(payload, json!({"body": "Body", "title": "Heading"}));
    }

    #[test]
    fn test_unset_attributes_are_omitted() {
        let mut alert = Alert::default();
        alert.set_loc_key("GAME_PLAY_REQUEST_FORMAT");
        alert.set_loc_args(strings(&["Foo", "Baz"]));
        let payload = alert.payload();
        let fields = payload.as_fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert!(!fields.contains_key(BODY));
        assert_eq!(fields[LOC_ARGS], json!(["Foo", "Baz"]));
    }

    #[test]
    fn test_fields_follow_wire_order() {
        let alert = Alert::new(
            Some("b".into()),
            Some("a".into()),
            Some("l".into()),
            Some(strings(&["x"])),
            Some("i.png".into()),
            Some("t".into()),
            Some("tk".into()),
            Some(strings(&["y"])),
        );
        let payload = alert.payload();
        let keys: Vec<&str> = payload
            .as_fields()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec![
                BODY,
                ACTION_LOC_KEY,
                LOC_KEY,
                LOC_ARGS,
                LAUNCH_IMAGE,
                TITLE,
                TITLE_LOC_KEY,
                TITLE_LOC_ARGS
            ]
        );
    }

    #[test]
    fn test_try_setters_reject_non_strings() {
        let mut alert = Alert::default();
        assert!(alert.try_set_action_loc_key(&json!([])).is_err());
        assert!(alert.try_set_loc_key(&json!([])).is_err());
        assert!(alert.try_set_launch_image(&json!([])).is_err());
        assert!(alert.try_set_title(&json!([])).is_err());
        assert!(alert.try_set_title_loc_key(&json!([])).is_err());
        assert!(alert.try_set_body(&json!(42)).is_err());
        assert!(alert.is_empty());
    }

    #[test]
    fn test_try_setter_null_clears() {
        let mut alert = Alert::from("Body");
        alert.try_set_body(&Value::Null).unwrap();
        assert_eq!(alert.body(), None);
    }

    #[test]
    fn test_try_from_value() {
        let alert = Alert::try_from(&json!("hello")).unwrap();
        assert_eq!(alert.body(), Some("hello"));

        let alert = Alert::try_from(&json!({
            "title": "Game Request",
            "loc-key": "GAME_PLAY_REQUEST_FORMAT",
            "loc-args": ["Jenna", "Frank"]
        }))
        .unwrap();
        assert_eq!(alert.title(), Some("Game Request"));
        assert_eq!(alert.loc_args(), Some(&strings(&["Jenna", "Frank"])[..]));

        assert!(Alert::try_from(&json!(5)).is_err());
        assert!(Alert::try_from(&json!({"title": 5})).is_err());
        assert!(Alert::try_from(&json!({"subtitle-ish": "x"})).is_err());
    }

    #[test]
    fn test_payload_serializes_untagged() {
        let text = serde_json::to_string(&Alert::from("hi").payload()).unwrap();
        assert_eq!(text, r#""hi""#);

        let mut alert = Alert::default();
        alert.set_title("T");
        let text = serde_json::to_string(&alert.payload()).unwrap();
        assert_eq!(text, r#"{"title":"T"}"#);
    }
}
