use serde::{Deserialize, Serialize};

/// A candidate recovery action and the lift it is expected to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryAction {
    pub action_name: String,
    pub expected_lift_percent: f64,
}

/// Request for a recovery-lift estimate. Transient; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryRequest {
    /// Position of the stage being modeled. Informational only; the
    /// arithmetic never reads it.
    pub stage_index: i64,
    pub action: RecoveryAction,
    pub current_users: u64,
    pub revenue_per_activated_user: f64,
}

/// Result of a recovery-lift estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryEstimate {
    pub recovered_users: i64,
    pub revenue_recovered: f64,
    pub new_conversion_rate: f64,
}

/// Round to two decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimate how many users and how much revenue a hypothetical lift would
/// recover.
///
/// `recovered_users` is the floor of `current_users * lift / 100`, so a
/// negative lift floors toward negative infinity. The conversion rate is
/// exactly `0.0` when `current_users` is zero rather than a division error.
pub fn estimate_recovery(request: &RecoveryRequest) -> RecoveryEstimate {
    let lift_decimal = request.action.expected_lift_percent / 100.0;
    let recovered_users = (request.current_users as f64 * lift_decimal).floor() as i64;
    let revenue_recovered =
        round2(recovered_users as f64 * request.revenue_per_activated_user);

    let new_conversion_rate = if request.current_users == 0 {
        0.0
    } else {
        let current = request.current_users as f64;
        round2((current + recovered_users as f64) / current * 100.0)
    };

    RecoveryEstimate {
        recovered_users,
        revenue_recovered,
        new_conversion_rate,
    }
}
