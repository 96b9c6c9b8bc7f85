use serde::Deserialize;

/// Maximum payload size APNs accepts for a regular (non-VoIP) notification
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 4096;

/// How non-ASCII text is written into the JSON payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonEncoding {
    /// Every non-ASCII character becomes a `\uXXXX` escape
    #[default]
    EscapedUnicode,
    /// Raw UTF-8, non-ASCII characters left as-is
    Utf8,
}

/// APNs Payload Configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApnsPayloadConfig {
    pub json_encoding: JsonEncoding,
    pub max_payload_bytes: usize,
}

impl Default for ApnsPayloadConfig {
    fn default() -> Self {
        Self {
            json_encoding: JsonEncoding::default(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl ApnsPayloadConfig {
    /// Create new payload configuration
    pub fn new(json_encoding: JsonEncoding, max_payload_bytes: usize) -> Self {
        Self {
            json_encoding,
            max_payload_bytes,
        }
    }

    /// Set JSON encoding mode
    pub fn with_encoding(mut self, json_encoding: JsonEncoding) -> Self {
        self.json_encoding = json_encoding;
        self
    }

    /// Set payload size limit
    pub fn with_max_payload_bytes(mut self, max_payload_bytes: usize) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }
}
