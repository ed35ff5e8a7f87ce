//! Centralized text encode/decode for persisted records.
//!
//! Every record that crosses the persistence boundary goes through these
//! two functions, so the textual encoding (pretty-printed JSON, camelCase
//! keys, RFC 3339 timestamps) is defined in one place instead of leaking
//! through the type system.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a persisted record to its textual form.
pub fn encode<T: Serialize>(record: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Decode a persisted record from its textual form.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::Timestamp;
    use crate::types::{ConversationData, ConversationId, ConversationMetadata, ProjectMetadata};

    fn ts(text: &str) -> Timestamp {
        Timestamp::parse(text).unwrap()
    }

    #[test]
    fn test_project_metadata_round_trip() {
        let metadata = ProjectMetadata {
            name: "atlas".to_string(),
            created_at: ts("2026-02-14T08:00:00.000Z"),
            default_model: None,
        };

        let text = encode(&metadata).unwrap();
        assert!(text.contains("\"createdAt\": \"2026-02-14T08:00:00.000Z\""));

        let back: ProjectMetadata = decode(&text).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn test_conversation_data_keeps_unknown_message_shape() {
        let metadata = ConversationMetadata {
            id: ConversationId::first(),
            name: None,
            created_at: ts("2026-03-01T09:00:00.000Z"),
            last_modified: ts("2026-03-01T09:00:00.000Z"),
        };
        let mut data: ConversationData = ConversationData::new(metadata);
        data.messages.push(serde_json::json!({
            "role": "assistant",
            "content": [{"type": "text", "text": "done"}],
            "stop_reason": "end_turn"
        }));

        let text = encode(&data).unwrap();
        let back: ConversationData = decode(&text).unwrap();
        assert_eq!(back, data);
        assert_eq!(back.messages[0]["stop_reason"], "end_turn");
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(decode::<ProjectMetadata>("{\"name\": 7}").is_err());
        assert!(decode::<ProjectMetadata>("not json").is_err());
    }
}
