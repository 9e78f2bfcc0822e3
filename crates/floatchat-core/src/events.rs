use serde::{Deserialize, Serialize};

use crate::types::{MessageId, Timestamp};

/// Out-of-band notices emitted by the conversation engine.
///
/// Notices are broadcast after state changes and consumed by:
/// - The interactive shell (transient status lines)
/// - Log output (debugging)
///
/// They carry summaries, never the artifacts themselves; the log and the
/// dashboard snapshot remain the only sources of displayable content.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SessionNotice {
    /// A user query was accepted and its request issued.
    QuerySubmitted {
        message_id: MessageId,
        query_len: usize,
        timestamp: Timestamp,
    },

    /// A backend response was normalized and applied to the log.
    ResponseApplied {
        message_id: MessageId,
        has_chart: bool,
        location_count: usize,
        timestamp: Timestamp,
    },

    /// A request failed; the log carries a synthetic assistant message.
    QueryFailed {
        message_id: MessageId,
        detail: String,
        timestamp: Timestamp,
    },

    /// The dashboard snapshot was replaced.
    SnapshotPublished {
        revision: u64,
        has_chart: bool,
        location_count: usize,
        timestamp: Timestamp,
    },
}

impl SessionNotice {
    /// Returns the timestamp of the notice.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            SessionNotice::QuerySubmitted { timestamp, .. }
            | SessionNotice::ResponseApplied { timestamp, .. }
            | SessionNotice::QueryFailed { timestamp, .. }
            | SessionNotice::SnapshotPublished { timestamp, .. } => *timestamp,
        }
    }

    /// Returns a human-readable notice name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            SessionNotice::QuerySubmitted { .. } => "query_submitted",
            SessionNotice::ResponseApplied { .. } => "response_applied",
            SessionNotice::QueryFailed { .. } => "query_failed",
            SessionNotice::SnapshotPublished { .. } => "snapshot_published",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_timestamp() {
        let ts = Timestamp::now();
        let notice = SessionNotice::QuerySubmitted {
            message_id: MessageId::new(),
            query_len: 42,
            timestamp: ts,
        };
        assert_eq!(notice.timestamp(), ts);
    }

    #[test]
    fn test_notice_names() {
        let ts = Timestamp::now();
        let id = MessageId::new();

        let notices = vec![
            SessionNotice::QuerySubmitted {
                message_id: id.clone(),
                query_len: 10,
                timestamp: ts,
            },
            SessionNotice::ResponseApplied {
                message_id: id.clone(),
                has_chart: true,
                location_count: 2,
                timestamp: ts,
            },
            SessionNotice::QueryFailed {
                message_id: id.clone(),
                detail: "backend unreachable".to_string(),
                timestamp: ts,
            },
            SessionNotice::SnapshotPublished {
                revision: 3,
                has_chart: false,
                location_count: 0,
                timestamp: ts,
            },
        ];

        let names: Vec<&str> = notices.iter().map(|n| n.event_name()).collect();
        assert_eq!(
            names,
            vec![
                "query_submitted",
                "response_applied",
                "query_failed",
                "snapshot_published"
            ]
        );
    }

    #[test]
    fn test_notice_serialization_roundtrip() {
        let notice = SessionNotice::QueryFailed {
            message_id: MessageId::new(),
            detail: "HTTP 500: database timed out".to_string(),
            timestamp: Timestamp::now(),
        };
        let json = serde_json::to_string(&notice).unwrap();
        let deserialized: SessionNotice = serde_json::from_str(&json).unwrap();
        assert_eq!(notice.event_name(), deserialized.event_name());
        assert_eq!(notice.timestamp(), deserialized.timestamp());

        if let SessionNotice::QueryFailed { detail, .. } = deserialized {
            assert_eq!(detail, "HTTP 500: database timed out");
        } else {
            panic!("Expected QueryFailed variant after deserialization");
        }
    }

    #[test]
    fn test_notice_clone_preserves_fields() {
        let notice = SessionNotice::SnapshotPublished {
            revision: 7,
            has_chart: true,
            location_count: 5,
            timestamp: Timestamp::now(),
        };
        let cloned = notice.clone();
        assert_eq!(notice.event_name(), cloned.event_name());
        assert_eq!(notice.timestamp(), cloned.timestamp());
    }
}
