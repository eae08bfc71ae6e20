//! Button callback payload
//!
//! Compact token carried by the inline keyboard buttons, encoding the command
//! and the target match id. Field names stay single-letter: Telegram caps
//! callback data at 64 bytes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackCommand {
    In,
    Maybe,
    Out,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackData {
    #[serde(rename = "c")]
    pub command: CallbackCommand,
    #[serde(rename = "m")]
    pub match_id: i64,
}

impl CallbackData {
    pub fn new(command: CallbackCommand, match_id: i64) -> Self {
        Self { command, match_id }
    }

    /// Serialized form placed on a button.
    pub fn encode(&self) -> String {
        // Serialization of this struct cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn decode(data: &str) -> Option<Self> {
        serde_json::from_str(data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_stays_compact() {
        let data = CallbackData::new(CallbackCommand::Refresh, i64::MAX);
        let encoded = data.encode();
        assert!(encoded.len() <= 64, "payload too large: {encoded}");
        assert_eq!(CallbackData::decode(&encoded), Some(data));
    }

    #[test]
    fn unknown_payloads_decode_to_none() {
        assert_eq!(CallbackData::decode("not json"), None);
        assert_eq!(CallbackData::decode(r#"{"c":"ban","m":1}"#), None);
    }
}
