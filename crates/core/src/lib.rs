//! Core domain types for the ActivateFlow funnel analytics service.
//!
//! A funnel snapshot records user counts and timing across a sequence of
//! conversion stages at one point in time. Snapshots are immutable once
//! created; their id and timestamp are always server-assigned. The recovery
//! calculator is a pure function over a transient request and touches no
//! state.

mod funnel;
mod recovery;

pub use funnel::{FunnelSnapshot, FunnelStage, FunnelSubmission};
pub use recovery::{estimate_recovery, RecoveryAction, RecoveryEstimate, RecoveryRequest};
