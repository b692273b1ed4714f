use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// One step in a conversion funnel, with its observed user count and timing
/// metrics. A stage has no identity beyond its position in the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage_name: String,
    pub users: u64,
    pub avg_time_hours: f64,
    pub target_sla_hours: f64,
}

/// Client payload for submitting a funnel snapshot.
///
/// Carries no id or timestamp; both are assigned server-side when the
/// snapshot is created. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelSubmission {
    pub revenue_per_activated_user: f64,
    pub stages: Vec<FunnelStage>,
}

/// A persisted funnel snapshot. Immutable once stored; never updated or
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelSnapshot {
    /// Opaque unique token, assigned at creation.
    pub id: String,
    pub revenue_per_activated_user: f64,
    /// Stage order is meaningful and preserved end to end.
    pub stages: Vec<FunnelStage>,
    /// Server-assigned creation time (UTC). RFC 3339 in JSON.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl FunnelSnapshot {
    /// Build a snapshot from a submission, assigning a fresh UUID and the
    /// current UTC time.
    pub fn from_submission(submission: FunnelSubmission) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            revenue_per_activated_user: submission.revenue_per_activated_user,
            stages: submission.stages,
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> FunnelSubmission {
        FunnelSubmission {
            revenue_per_activated_user: 450.0,
            stages: vec![
                FunnelStage {
                    stage_name: "Signup Completed".to_string(),
                    users: 10_000,
                    avg_time_hours: 0.0,
                    target_sla_hours: 0.0,
                },
                FunnelStage {
                    stage_name: "Email Verified".to_string(),
                    users: 7_200,
                    avg_time_hours: 8.0,
                    target_sla_hours: 2.0,
                },
            ],
        }
    }

    #[test]
    fn from_submission_assigns_unique_ids() {
        let a = FunnelSnapshot::from_submission(submission());
        let b = FunnelSnapshot::from_submission(submission());
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn from_submission_preserves_stage_order() {
        let snapshot = FunnelSnapshot::from_submission(submission());
        assert_eq!(snapshot.stages[0].stage_name, "Signup Completed");
        assert_eq!(snapshot.stages[1].stage_name, "Email Verified");
        assert_eq!(snapshot.revenue_per_activated_user, 450.0);
    }

    #[test]
    fn snapshot_serializes_timestamp_as_rfc3339() {
        let snapshot = FunnelSnapshot::from_submission(submission());
        let json = serde_json::to_value(&snapshot).expect("serialize snapshot");
        let timestamp = json["timestamp"].as_str().expect("timestamp is a string");
        assert!(timestamp.contains('T'), "not RFC 3339: {timestamp}");

        let back: FunnelSnapshot = serde_json::from_value(json).expect("deserialize snapshot");
        assert_eq!(back, snapshot);
    }

    #[test]
    fn submission_ignores_unknown_fields() {
        let raw = r#"{
            "revenue_per_activated_user": 100.0,
            "stages": [],
            "id": "client-supplied",
            "timestamp": "2020-01-01T00:00:00Z"
        }"#;
        let parsed: FunnelSubmission = serde_json::from_str(raw).expect("parse submission");
        assert_eq!(parsed.revenue_per_activated_user, 100.0);
        assert!(parsed.stages.is_empty());
    }

    #[test]
    fn submission_rejects_negative_users() {
        let raw = r#"{
            "revenue_per_activated_user": 100.0,
            "stages": [
                {"stage_name": "x", "users": -5, "avg_time_hours": 1.0, "target_sla_hours": 1.0}
            ]
        }"#;
        assert!(serde_json::from_str::<FunnelSubmission>(raw).is_err());
    }
}
