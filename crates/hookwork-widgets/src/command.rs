//! Remote Command Channel
//!
//! JSON envelopes posted by a host editor:
//! `{"type":"carousel","id":"block-1","operation":"navigate","index":2}`.
//! A command reaches an instance only when `type` equals the instance's
//! kind and `id` equals its root's `data-id`.

use serde::{Deserialize, Serialize};

/// Operation named by an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Navigate,
    #[serde(other)]
    Unknown,
}

/// Identifier field; editors send either strings or numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    Text(String),
    Number(u64),
}

impl Identity {
    fn matches(&self, id: &str) -> bool {
        match self {
            Identity::Text(text) => text == id,
            Identity::Number(n) => n.to_string() == id,
        }
    }
}

/// Wire envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Identity,
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// Validated command for one instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    Navigate { index: usize },
}

impl CommandEnvelope {
    pub fn navigate(kind: &str, id: &str, index: usize) -> Self {
        Self {
            kind: kind.to_string(),
            id: Identity::Text(id.to_string()),
            operation: Operation::Navigate,
            index: Some(index),
        }
    }

    /// Parse message data; malformed input yields `None`
    pub fn parse(data: &str) -> Option<Self> {
        match serde_json::from_str(data) {
            Ok(envelope) => Some(envelope),
            Err(err) => {
                tracing::trace!("ignoring malformed command: {}", err);
                None
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The command this envelope carries for an instance of `kind` whose
    /// root has identity `identity`
    pub fn command_for(&self, kind: &str, identity: Option<&str>) -> Option<RemoteCommand> {
        if self.kind != kind || !identity.is_some_and(|id| self.id.matches(id)) {
            return None;
        }
        match (self.operation, self.index) {
            (Operation::Navigate, Some(index)) => Some(RemoteCommand::Navigate { index }),
            (Operation::Navigate, None) => {
                tracing::trace!("navigate command without index");
                None
            }
            (Operation::Unknown, _) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigate() {
        let envelope = CommandEnvelope::parse(
            r#"{"type":"carousel","id":"block-1","operation":"navigate","index":2}"#,
        ).unwrap();

        assert_eq!(envelope, CommandEnvelope::navigate("carousel", "block-1", 2));
        assert_eq!(
            envelope.command_for("carousel", Some("block-1")),
            Some(RemoteCommand::Navigate { index: 2 })
        );
    }

    #[test]
    fn test_addressing() {
        let envelope = CommandEnvelope::navigate("carousel", "block-1", 0);

        assert_eq!(envelope.command_for("accordion", Some("block-1")), None);
        assert_eq!(envelope.command_for("carousel", Some("block-2")), None);
        assert_eq!(envelope.command_for("carousel", None), None);
    }

    #[test]
    fn test_numeric_id() {
        let envelope = CommandEnvelope::parse(
            r#"{"type":"accordion","id":42,"operation":"navigate","index":1}"#,
        ).unwrap();
        assert!(envelope.command_for("accordion", Some("42")).is_some());
    }

    #[test]
    fn test_unknown_operation_ignored() {
        let envelope = CommandEnvelope::parse(
            r#"{"type":"carousel","id":"a","operation":"explode","index":1}"#,
        ).unwrap();
        assert_eq!(envelope.operation, Operation::Unknown);
        assert_eq!(envelope.command_for("carousel", Some("a")), None);
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(CommandEnvelope::parse("not json").is_none());
        assert!(CommandEnvelope::parse(r#"{"type":"carousel"}"#).is_none());
        assert!(CommandEnvelope::parse(
            r#"{"type":"carousel","id":"a","operation":"navigate","index":-1}"#
        ).is_none());
    }

    #[test]
    fn test_to_json_round_trip() {
        let envelope = CommandEnvelope::navigate("carousel", "hero", 3);
        assert_eq!(CommandEnvelope::parse(&envelope.to_json()), Some(envelope));
    }
}
