//! `activateflow recovery` -- offline recovery-lift estimates.
//!
//! Runs the same pure calculator the `/api/recovery/calculate` endpoint
//! uses, without starting a server.

use activateflow_core::{estimate_recovery, RecoveryAction, RecoveryRequest};

use crate::OutputFormat;

pub(crate) fn run(
    current_users: u64,
    lift_percent: f64,
    revenue: f64,
    action_name: &str,
    output: OutputFormat,
) {
    let request = RecoveryRequest {
        stage_index: 0,
        action: RecoveryAction {
            action_name: action_name.to_string(),
            expected_lift_percent: lift_percent,
        },
        current_users,
        revenue_per_activated_user: revenue,
    };

    let estimate = estimate_recovery(&request);

    match output {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "recovered_users": estimate.recovered_users,
                "revenue_recovered": estimate.revenue_recovered,
                "new_conversion_rate": estimate.new_conversion_rate,
            });
            println!("{body}");
        }
        OutputFormat::Text => {
            println!("Action:              {}", action_name);
            println!("Recovered users:     {}", estimate.recovered_users);
            println!("Revenue recovered:   {:.2}", estimate.revenue_recovered);
            println!("New conversion rate: {:.2}%", estimate.new_conversion_rate);
        }
    }
}
