//! OSRM HTTP adapter for turn-by-turn directions.

use tracing::{debug, warn};

use crate::directions::{self, Directions, DirectionsRequest, RouteResponse};
use crate::traits::DirectionsProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Route-service URL for the request's stops.
    pub fn route_url(&self, request: &DirectionsRequest) -> String {
        // OSRM takes lng,lat.
        let coords = request
            .stops()
            .iter()
            .map(|p| format!("{:.6},{:.6}", p.longitude, p.latitude))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=polyline&steps=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl DirectionsProvider for OsrmClient {
    fn directions_for(&self, request: &DirectionsRequest) -> Option<Directions> {
        let url = self.route_url(request);
        debug!(stops = request.stop_count(), "requesting directions");

        // OSRM answers NoRoute and friends with a 400 and a JSON body, so the
        // body is shaped before the status is checked.
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| {
                let status = resp.status();
                resp.json::<RouteResponse>().map(|body| (status, body))
            });

        match response {
            Ok((status, body)) if status.is_success() || body.code != "Ok" => {
                directions::shape(&body)
            }
            Ok((status, _)) => {
                warn!(%status, "directions provider returned non-success status");
                None
            }
            Err(err) => {
                warn!(error = %err, "directions request failed");
                None
            }
        }
    }
}
