//! Memory types for mnemo.
//!
//! A memory is a short, attributable fact about an owner (a user), stored
//! together with its embedding vector. Conversations are the raw input from
//! which facts are extracted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a memory record, wrapping a UUID v7 (time-sortable).
///
/// Assigned by the store when a record is created; never supplied by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryId(pub Uuid);

impl MemoryId {
    /// Create a fresh MemoryId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MemoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemoryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A stored fact with identity, text, vector, and owner.
///
/// `id` and `owner_id` never change after creation. `text` and `embedding`
/// are only ever replaced together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: MemoryId,
    pub owner_id: String,
    /// The fact itself.
    pub text: String,
    /// Embedding of `text`; skipped in serialized output.
    #[serde(skip_serializing, default)]
    pub embedding: Vec<f32>,
}

impl MemoryRecord {
    /// Create a record with a freshly generated id.
    pub fn new(owner_id: impl Into<String>, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: MemoryId::new(),
            owner_id: owner_id.into(),
            text: text.into(),
            embedding,
        }
    }

    /// Project into the public search shape.
    pub fn to_hit(&self) -> SearchHit {
        SearchHit {
            id: self.id,
            memory: self.text.clone(),
        }
    }
}

/// One result of a memory search: `{id, memory}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: MemoryId,
    pub memory: String,
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: String,
    pub content: String,
}

impl Turn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Input to fact extraction: raw text or an ordered list of turns.
///
/// Deserializes from either a JSON string or a JSON array of
/// `{"role": ..., "content": ...}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Conversation {
    Text(String),
    Turns(Vec<Turn>),
}

impl Conversation {
    /// Flatten into the single string sent to the extractor.
    ///
    /// Turns are rendered as `"{role}: {content}"`, one per line, in order.
    pub fn transcript(&self) -> String {
        match self {
            Conversation::Text(text) => text.clone(),
            Conversation::Turns(turns) => turns
                .iter()
                .map(|t| format!("{}: {}", t.role, t.content))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<&str> for Conversation {
    fn from(text: &str) -> Self {
        Conversation::Text(text.to_string())
    }
}

impl From<String> for Conversation {
    fn from(text: String) -> Self {
        Conversation::Text(text)
    }
}

impl From<Vec<Turn>> for Conversation {
    fn from(turns: Vec<Turn>) -> Self {
        Conversation::Turns(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_id_display_and_parse_agree() {
        let id = MemoryId::new();
        let parsed: MemoryId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_memory_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<MemoryId>().is_err());
    }

    #[test]
    fn test_records_get_distinct_ids() {
        let a = MemoryRecord::new("u1", "fact", vec![1.0]);
        let b = MemoryRecord::new("u1", "fact", vec![1.0]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_search_hit_serializes_as_id_and_memory() {
        let record = MemoryRecord::new("u1", "Alice lives in Paris", vec![0.5, 0.5]);
        let json = serde_json::to_value(record.to_hit()).unwrap();
        assert_eq!(json["id"], serde_json::json!(record.id.to_string()));
        assert_eq!(json["memory"], "Alice lives in Paris");
    }

    #[test]
    fn test_record_serialization_skips_embedding() {
        let record = MemoryRecord::new("u1", "fact", vec![0.1; 4]);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("embedding").is_none());
        assert_eq!(json["owner_id"], "u1");
    }

    #[test]
    fn test_text_transcript_is_unchanged() {
        let convo = Conversation::from("hello there");
        assert_eq!(convo.transcript(), "hello there");
    }

    #[test]
    fn test_turns_transcript_joins_role_lines_in_order() {
        let convo = Conversation::from(vec![
            Turn::user("I moved to Paris"),
            Turn::assistant("How do you like it?"),
        ]);
        assert_eq!(
            convo.transcript(),
            "user: I moved to Paris\nassistant: How do you like it?"
        );
    }

    #[test]
    fn test_conversation_deserializes_from_string_or_turns() {
        let text: Conversation = serde_json::from_str(r#""just text""#).unwrap();
        assert_eq!(text, Conversation::Text("just text".to_string()));

        let turns: Conversation =
            serde_json::from_str(r#"[{"role": "user", "content": "hi"}]"#).unwrap();
        assert_eq!(turns, Conversation::Turns(vec![Turn::user("hi")]));
    }
}
