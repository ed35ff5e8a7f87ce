//! Core domain types for parlor
//!
//! These types describe the shape of workspace records. Lifecycle logic
//! (creating, mutating, deleting records) lives in the consuming
//! application; this crate only defines the records themselves, their
//! textual encoding, and the shape checks for values arriving from
//! external code.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Project** | A named workspace grouping zero or more Conversations and a virtual file system |
//! | **Conversation** | A single chat session within a Project, identified by a sequential id |
//! | **Todo** | A task item attached to a Conversation |
//! | **VFS** | The project-scoped virtual file system: a mapping from relative file path to file content |
//!
//! ## Runtime rows vs persisted records
//!
//! [`Project`] and [`Conversation`] are runtime rows: they carry cached
//! summary counts assembled by the caller at read time. [`ProjectMetadata`],
//! [`ConversationMetadata`], [`ConversationData`], and [`ProjectData`] are
//! the persisted records; they never carry derived counts. Conversions
//! between the two families take the counts as explicit arguments, because
//! a persisted record cannot know them all.

use crate::error::{Error, Result};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================
// Conversation Ids
// ============================================

/// Sequential conversation identifier, rendered as `conv-NNN`.
///
/// Indexes start at 1 and are zero-padded to three digits; wider indexes
/// render unpadded (`conv-1000`). Parsing accepts both forms and rejects
/// everything else, including `conv-000` and excess leading zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConversationId(u32);

impl ConversationId {
    /// Create an id from a 1-based index.
    pub fn new(index: u32) -> Result<Self> {
        if index == 0 {
            return Err(Error::InvalidConversationId("conv-000".to_string()));
        }
        Ok(Self(index))
    }

    /// The first id in a project: `conv-001`.
    pub fn first() -> Self {
        Self(1)
    }

    /// The id following this one in the sequence.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// The 1-based index behind the textual form.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conv-{:03}", self.0)
    }
}

impl std::str::FromStr for ConversationId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidConversationId(s.to_string());

        let digits = s.strip_prefix("conv-").ok_or_else(invalid)?;
        if digits.len() < 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // Padding is exactly three digits wide; wider forms carry no zeros.
        if digits.len() > 3 && digits.starts_with('0') {
            return Err(invalid());
        }

        let index: u32 = digits.parse().map_err(|_| invalid())?;
        if index == 0 {
            return Err(invalid());
        }
        Ok(Self(index))
    }
}

impl TryFrom<String> for ConversationId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ConversationId> for String {
    fn from(id: ConversationId) -> Self {
        id.to_string()
    }
}

// ============================================
// Projects
// ============================================

/// A named workspace containing conversations.
///
/// Runtime row. `conversations_count` is a cached summary computed by the
/// caller when the row is assembled, not an authoritative counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique name within the workspace
    pub name: String,
    /// Filesystem path to the project root
    pub path: PathBuf,
    /// When the project was created
    pub created_at: Timestamp,
    /// Default model identifier for new conversations (optional)
    pub default_model: Option<String>,
    /// Cached number of conversations in this project
    pub conversations_count: u32,
}

impl Project {
    /// Reassemble a runtime row from its persisted summary.
    ///
    /// The persisted record carries neither the path nor the derived count,
    /// so both come from the caller.
    pub fn from_metadata(
        metadata: ProjectMetadata,
        path: PathBuf,
        conversations_count: u32,
    ) -> Self {
        Self {
            name: metadata.name,
            path,
            created_at: metadata.created_at,
            default_model: metadata.default_model,
            conversations_count,
        }
    }

    /// Shape check for rows arriving from external code.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::shape("project", "name must be non-empty"));
        }
        if self.path.as_os_str().is_empty() {
            return Err(Error::shape("project", "path must be non-empty"));
        }
        Ok(())
    }
}

/// Persisted summary of a [`Project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Unique name within the workspace
    pub name: String,
    /// When the project was created
    pub created_at: Timestamp,
    /// Default model identifier for new conversations (optional)
    pub default_model: Option<String>,
}

impl ProjectMetadata {
    /// Shape check for records arriving from external code.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::shape("project metadata", "name must be non-empty"));
        }
        Ok(())
    }
}

impl From<&Project> for ProjectMetadata {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            created_at: project.created_at,
            default_model: project.default_model.clone(),
        }
    }
}

// ============================================
// Conversations
// ============================================

/// A single chat session within a project.
///
/// Runtime row. `message_count` and `file_count` are cached summaries, not
/// authoritative counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Sequential identifier within the project
    pub id: ConversationId,
    /// Display name (optional)
    pub name: Option<String>,
    /// When the conversation was created
    pub created_at: Timestamp,
    /// When the conversation was last modified
    pub last_modified: Timestamp,
    /// Cached number of messages
    pub message_count: u32,
    /// Cached number of files in the project VFS at assembly time
    pub file_count: u32,
}

impl Conversation {
    /// Reassemble a runtime row from its persisted metadata.
    pub fn from_metadata(
        metadata: ConversationMetadata,
        message_count: u32,
        file_count: u32,
    ) -> Self {
        Self {
            id: metadata.id,
            name: metadata.name,
            created_at: metadata.created_at,
            last_modified: metadata.last_modified,
            message_count,
            file_count,
        }
    }

    /// Shape check for rows arriving from external code.
    pub fn validate(&self) -> Result<()> {
        if self.last_modified < self.created_at {
            return Err(Error::shape(
                "conversation",
                format!("{} was modified before it was created", self.id),
            ));
        }
        Ok(())
    }
}

/// Persisted metadata sub-record of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMetadata {
    /// Sequential identifier within the project
    pub id: ConversationId,
    /// Display name (optional)
    pub name: Option<String>,
    /// When the conversation was created
    pub created_at: Timestamp,
    /// When the conversation was last modified
    pub last_modified: Timestamp,
}

impl ConversationMetadata {
    /// Shape check for records arriving from external code.
    pub fn validate(&self) -> Result<()> {
        if self.last_modified < self.created_at {
            return Err(Error::shape(
                "conversation metadata",
                format!("{} was modified before it was created", self.id),
            ));
        }
        Ok(())
    }
}

impl From<&Conversation> for ConversationMetadata {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id,
            name: conversation.name.clone(),
            created_at: conversation.created_at,
            last_modified: conversation.last_modified,
        }
    }
}

// ============================================
// Todos
// ============================================

/// A task item attached to a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Task text
    pub text: String,
    /// Whether the task has been completed
    pub completed: bool,
    /// When the task was created
    pub created_at: Timestamp,
}

impl TodoItem {
    /// A fresh, incomplete task created now.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            created_at: Timestamp::now(),
        }
    }

    /// Shape check for records arriving from external code.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(Error::shape("todo", "text must be non-empty"));
        }
        Ok(())
    }
}

// ============================================
// Conversation Content
// ============================================

/// Full persisted content of a conversation.
///
/// `M` is the message record type the consuming system defines; this crate
/// deliberately does not constrain the message format. The default keeps
/// unrecognized payloads lossless as raw JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationData<M = serde_json::Value> {
    /// Identity and timestamps
    pub metadata: ConversationMetadata,
    /// Ordered message records, oldest first
    pub messages: Vec<M>,
    /// Ordered task items, oldest first
    pub todos: Vec<TodoItem>,
}

impl<M> ConversationData<M> {
    /// An empty conversation with the given metadata.
    pub fn new(metadata: ConversationMetadata) -> Self {
        Self {
            metadata,
            messages: Vec::new(),
            todos: Vec::new(),
        }
    }

    /// Assemble the runtime summary row for this conversation.
    ///
    /// The file count lives in the project VFS, not here, so the caller
    /// supplies it.
    pub fn to_summary(&self, file_count: u32) -> Conversation {
        Conversation {
            id: self.metadata.id,
            name: self.metadata.name.clone(),
            created_at: self.metadata.created_at,
            last_modified: self.metadata.last_modified,
            message_count: self.messages.len() as u32,
            file_count,
        }
    }

    /// Shape check for records arriving from external code.
    ///
    /// Messages are opaque here and are not inspected.
    pub fn validate(&self) -> Result<()> {
        self.metadata.validate()?;
        for todo in &self.todos {
            todo.validate()?;
        }
        Ok(())
    }
}

// ============================================
// Project Virtual File System
// ============================================

/// Persisted virtual file system for a project.
///
/// The VFS is scoped to the project; it replaced an older per-conversation
/// file map. Keys are relative paths, values are full file contents. The
/// map is ordered so the encoded form is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    /// Relative file path -> file content
    pub files: BTreeMap<String, String>,
    /// When any file was last written
    pub last_modified: Timestamp,
}

impl ProjectData {
    /// An empty VFS stamped with the given instant.
    pub fn new(last_modified: Timestamp) -> Self {
        Self {
            files: BTreeMap::new(),
            last_modified,
        }
    }

    /// Content of a file, if present.
    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Number of files, as cached on runtime rows.
    pub fn file_count(&self) -> u32 {
        self.files.len() as u32
    }

    /// Shape check for records arriving from external code.
    ///
    /// Every key must be a non-empty relative path with no traversal
    /// segments.
    pub fn validate(&self) -> Result<()> {
        for path in self.files.keys() {
            check_vfs_path(path)?;
        }
        Ok(())
    }
}

/// Reject VFS keys that are not clean relative paths.
fn check_vfs_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::shape("project files", "empty file path"));
    }
    if path.starts_with('/') || path.starts_with('\\') {
        return Err(Error::shape(
            "project files",
            format!("absolute file path: {path}"),
        ));
    }
    for segment in path.split('/') {
        match segment {
            "" => {
                return Err(Error::shape(
                    "project files",
                    format!("empty segment in file path: {path}"),
                ))
            }
            "." | ".." => {
                return Err(Error::shape(
                    "project files",
                    format!("traversal segment in file path: {path}"),
                ))
            }
            _ => {}
        }
    }
    Ok(())
}
