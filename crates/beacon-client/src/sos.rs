//! SOS alert dispatch boundary.
//!
//! Writing an alert record triggers downstream email/push fan-out owned
//! by a separate serverless collaborator.  The contract here is
//! best-effort side effects only: errors are logged and never surfaced to
//! the writer, so an SOS flow can never fail on notification plumbing.

use beacon_shared::types::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Profile fields the notification fan-out needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SosProfile {
    pub username: String,
}

/// An SOS alert record as written to the collector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SosAlert {
    pub profile_info: SosProfile,
    pub location: GeoPoint,
    pub timestamp: DateTime<Utc>,
}

impl SosAlert {
    /// Build an alert for `username` at `location`, timestamped now.
    pub fn new(username: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            profile_info: SosProfile {
                username: username.into(),
            },
            location,
            timestamp: Utc::now(),
        }
    }
}

/// Post `alert` to the collector at `base_url`.
///
/// Best-effort: failures are logged, never returned.
pub async fn dispatch_sos_alert(base_url: &str, alert: &SosAlert) {
    let url = format!("{}/sos_alerts", base_url.trim_end_matches('/'));

    match reqwest::Client::new().post(&url).json(alert).send().await {
        Ok(resp) if resp.status().is_success() => {
            info!(username = %alert.profile_info.username, "SOS alert dispatched");
        }
        Ok(resp) => {
            error!(status = %resp.status(), "SOS alert collector rejected the alert");
        }
        Err(e) => {
            error!(error = %e, "Failed to reach the SOS alert collector");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_serializes_with_collector_field_names() {
        let alert = SosAlert::new(
            "alice",
            GeoPoint {
                latitude: 59.33,
                longitude: 18.06,
            },
        );

        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["profileInfo"]["username"], "alice");
        assert_eq!(json["location"]["latitude"], 59.33);
        assert_eq!(json["location"]["longitude"], 18.06);
        assert!(json["timestamp"].is_string());
    }
}
