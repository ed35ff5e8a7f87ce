//! Integration tests for the parlor data model
//!
//! These tests exercise the whole record flow an embedding application
//! would drive: assemble records, push them through the textual boundary,
//! reassemble runtime rows, and shape-check values as if they had arrived
//! from external code.

use parlor_core::{
    codec, Config, Conversation, ConversationData, ConversationId, ConversationMetadata,
    CoverageReporter, Environment, Project, ProjectData, ProjectMetadata, Timestamp, TodoItem,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn ts(text: &str) -> Timestamp {
    Timestamp::parse(text).unwrap()
}

/// A concrete message record, standing in for whatever format the
/// consuming system defines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

fn chat(role: &str, content: &str) -> ChatMessage {
    ChatMessage {
        role: role.to_string(),
        content: content.to_string(),
    }
}

// ============================================
// Record assembly and the textual boundary
// ============================================

#[test]
fn test_conversation_flow_with_typed_messages() {
    let metadata = ConversationMetadata {
        id: ConversationId::first(),
        name: Some("kickoff".to_string()),
        created_at: ts("2026-03-01T09:00:00.000Z"),
        last_modified: ts("2026-03-01T10:30:00.000Z"),
    };

    let mut data: ConversationData<ChatMessage> = ConversationData::new(metadata);
    data.messages.push(chat("user", "sketch the data model"));
    data.messages.push(chat("assistant", "done, see below"));
    data.todos.push(TodoItem::new("review the sketch"));

    data.validate().expect("assembled record should conform");

    let text = codec::encode(&data).unwrap();
    let back: ConversationData<ChatMessage> = codec::decode(&text).unwrap();
    assert_eq!(back, data);

    let summary = back.to_summary(2);
    assert_eq!(summary.id.to_string(), "conv-001");
    assert_eq!(summary.message_count, 2);
    assert_eq!(summary.file_count, 2);
}

#[test]
fn test_typed_and_opaque_views_of_the_same_record() {
    let metadata = ConversationMetadata {
        id: ConversationId::new(2).unwrap(),
        name: None,
        created_at: ts("2026-03-02T09:00:00.000Z"),
        last_modified: ts("2026-03-02T09:00:00.000Z"),
    };
    let mut typed: ConversationData<ChatMessage> = ConversationData::new(metadata);
    typed.messages.push(chat("user", "hello"));

    // A reader that does not know the message format still round-trips it.
    let text = codec::encode(&typed).unwrap();
    let opaque: ConversationData = codec::decode(&text).unwrap();
    assert_eq!(opaque.messages.len(), 1);
    assert_eq!(opaque.messages[0]["role"], "user");

    let text_again = codec::encode(&opaque).unwrap();
    let typed_again: ConversationData<ChatMessage> = codec::decode(&text_again).unwrap();
    assert_eq!(typed_again, typed);
}

#[test]
fn test_project_rows_from_persisted_records() {
    let metadata = ProjectMetadata {
        name: "atlas".to_string(),
        created_at: ts("2026-02-14T08:00:00.000Z"),
        default_model: Some("sonnet-4".to_string()),
    };

    let text = codec::encode(&metadata).unwrap();
    let decoded: ProjectMetadata = codec::decode(&text).unwrap();
    decoded.validate().unwrap();

    let conversations = [
        ConversationId::first(),
        ConversationId::first().next(),
        ConversationId::first().next().next(),
    ];
    let project = Project::from_metadata(
        decoded,
        PathBuf::from("/home/sam/projects/atlas"),
        conversations.len() as u32,
    );
    project.validate().unwrap();
    assert_eq!(project.conversations_count, 3);
    assert_eq!(conversations[2].to_string(), "conv-003");
}

#[test]
fn test_project_vfs_round_trip() {
    let mut vfs = ProjectData::new(ts("2026-03-01T12:00:00.000Z"));
    vfs.files
        .insert("src/main.rs".to_string(), "fn main() {}".to_string());
    vfs.files
        .insert("docs/notes.md".to_string(), "# notes".to_string());
    vfs.validate().unwrap();

    let text = codec::encode(&vfs).unwrap();
    // Deterministic encoding: ordered keys, textual timestamp
    assert!(text.contains("\"lastModified\": \"2026-03-01T12:00:00.000Z\""));
    assert!(text.find("docs/notes.md").unwrap() < text.find("src/main.rs").unwrap());

    let back: ProjectData = codec::decode(&text).unwrap();
    assert_eq!(back, vfs);
    assert_eq!(back.file_count(), 2);
    assert_eq!(back.file("src/main.rs"), Some("fn main() {}"));
}

// ============================================
// Shape checks at the decode boundary
// ============================================

#[test]
fn test_decoded_records_still_get_shape_checked() {
    // Structurally valid JSON that fails the conformance rules
    let text = r#"{
        "files": {"../escape": "oops"},
        "lastModified": "2026-03-01T12:00:00.000Z"
    }"#;
    let vfs: ProjectData = codec::decode(text).unwrap();
    assert!(vfs.validate().is_err());

    let text = r#"{
        "name": "",
        "createdAt": "2026-02-14T08:00:00.000Z",
        "defaultModel": null
    }"#;
    let metadata: ProjectMetadata = codec::decode(text).unwrap();
    assert!(metadata.validate().is_err());
}

#[test]
fn test_malformed_ids_and_timestamps_rejected_at_decode() {
    let text = r#"{
        "metadata": {
            "id": "conv-7",
            "name": null,
            "createdAt": "2026-03-01T09:00:00.000Z",
            "lastModified": "2026-03-01T09:00:00.000Z"
        },
        "messages": [],
        "todos": []
    }"#;
    assert!(codec::decode::<ConversationData>(text).is_err());

    let text = r#"{
        "name": "atlas",
        "createdAt": "last tuesday",
        "defaultModel": null
    }"#;
    assert!(codec::decode::<ProjectMetadata>(text).is_err());
}

#[test]
fn test_summary_counts_are_not_trusted() {
    // Counts on runtime rows are caches; a decoded row with a stale count
    // still conforms, because nothing authoritative backs it.
    let row = Conversation::from_metadata(
        ConversationMetadata {
            id: ConversationId::new(9).unwrap(),
            name: None,
            created_at: ts("2026-03-01T09:00:00.000Z"),
            last_modified: ts("2026-03-01T09:00:00.000Z"),
        },
        999,
        0,
    );
    assert!(row.validate().is_ok());
}

// ============================================
// Harness configuration
// ============================================

#[test]
fn test_harness_record_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[harness]
setup_files = ["tests/env.setup", "tests/db.setup"]

[harness.coverage]
exclude = ["**/generated/**"]
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();

    // Unset fields keep the declared defaults
    assert_eq!(config.harness.environment, Environment::Node);
    assert_eq!(config.harness.test_timeout_ms, 30000);
    assert_eq!(config.harness.hook_timeout_ms, 30000);
    assert_eq!(
        config.harness.coverage.reporters,
        vec![
            CoverageReporter::Text,
            CoverageReporter::Json,
            CoverageReporter::Html
        ]
    );

    // Overridden fields take effect in order
    assert_eq!(
        config.harness.setup_files,
        vec![
            PathBuf::from("tests/env.setup"),
            PathBuf::from("tests/db.setup")
        ]
    );
    assert!(config.harness.coverage.is_excluded("src/generated/api.js"));
    assert!(!config.harness.coverage.is_excluded("src/api.js"));
}

#[test]
fn test_invalid_harness_record_rejected_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[harness]
test_timeout_ms = 0
"#,
    )
    .unwrap();

    assert!(Config::load_from(&path).is_err());
}
