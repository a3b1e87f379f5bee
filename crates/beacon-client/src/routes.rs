//! Directions boundary client.
//!
//! Thin typed wrapper over the third-party directions API used by the
//! location screen.  On failure the screen falls back to an empty route
//! list and shows an alert; this client only returns the typed error.

use beacon_shared::types::{GeoPoint, TravelMode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ClientError, Result};

/// A route request: where from, where to, optionally via where, and how.
#[derive(Debug, Clone, Serialize)]
pub struct RouteQuery {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub waypoint: Option<GeoPoint>,
    pub mode: TravelMode,
}

/// One candidate route returned by the directions API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteCandidate {
    /// Total length in meters.
    #[serde(rename = "distance")]
    pub distance_m: f64,
    /// Estimated travel time in seconds.
    #[serde(rename = "duration")]
    pub duration_s: f64,
    /// Polyline coordinates from origin to destination.
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    routes: Vec<RouteCandidate>,
}

fn coord_param(point: &GeoPoint) -> String {
    format!("{},{}", point.latitude, point.longitude)
}

/// Fetch candidate routes from the directions service at `base_url`.
pub async fn fetch_routes(base_url: &str, query: &RouteQuery) -> Result<Vec<RouteCandidate>> {
    let url = format!("{}/directions", base_url.trim_end_matches('/'));

    let mut params = vec![
        ("origin", coord_param(&query.origin)),
        ("destination", coord_param(&query.destination)),
        ("mode", query.mode.as_param().to_string()),
    ];
    if let Some(ref waypoint) = query.waypoint {
        params.push(("waypoints", coord_param(waypoint)));
    }

    let resp = reqwest::Client::new()
        .get(&url)
        .query(&params)
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(ClientError::BadResponse {
            service: "directions",
            detail: format!("status {}", resp.status()),
        });
    }

    let body: DirectionsResponse = resp.json().await?;

    info!(
        routes = body.routes.len(),
        mode = query.mode.as_param(),
        "Routes fetched"
    );
    Ok(body.routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_params_are_lat_comma_lng() {
        let point = GeoPoint {
            latitude: 48.8584,
            longitude: 2.2945,
        };
        assert_eq!(coord_param(&point), "48.8584,2.2945");
    }

    #[test]
    fn response_parses_distance_duration_and_points() {
        let json = r#"{
            "routes": [
                {
                    "distance": 1250.0,
                    "duration": 900.0,
                    "points": [
                        {"latitude": 48.85, "longitude": 2.29},
                        {"latitude": 48.86, "longitude": 2.30}
                    ]
                }
            ]
        }"#;

        let body: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.routes.len(), 1);
        let route = &body.routes[0];
        assert_eq!(route.distance_m, 1250.0);
        assert_eq!(route.duration_s, 900.0);
        assert_eq!(route.points.len(), 2);
        assert_eq!(route.points[1].longitude, 2.30);
    }

    #[test]
    fn empty_route_list_is_valid() {
        // The no-route case: callers fall back to rendering nothing.
        let body: DirectionsResponse = serde_json::from_str(r#"{"routes": []}"#).unwrap();
        assert!(body.routes.is_empty());
    }
}
