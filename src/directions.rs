//! Directions request building and response shaping.
//!
//! Neither half touches the network. [`build`] reduces an ordered stop list
//! to what a directions provider accepts, and [`shape`] turns a provider's
//! route response into per-leg durations and offsets.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geo::GeoPoint;
use crate::polyline::{DEFAULT_PRECISION, Polyline};
use crate::sequence::Waypoint;

/// Stop cap imposed by most hosted directions APIs.
pub const DEFAULT_MAX_STOPS: usize = 25;

/// Origin, destination and the stops in between, in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub waypoints: Vec<GeoPoint>,
    /// True when middle stops were dropped to respect the stop cap.
    pub truncated: bool,
    /// How many middle stops were dropped.
    pub dropped: usize,
}

impl DirectionsRequest {
    /// Every stop, origin first and destination last.
    pub fn stops(&self) -> Vec<GeoPoint> {
        let mut stops = Vec::with_capacity(self.waypoints.len() + 2);
        stops.push(self.origin);
        stops.extend_from_slice(&self.waypoints);
        stops.push(self.destination);
        stops
    }

    pub fn stop_count(&self) -> usize {
        self.waypoints.len() + 2
    }
}

/// Build a directions request from sequenced waypoints.
///
/// Explicit `origin`/`destination` (a depot or the school) take precedence
/// over the first/last waypoint. Returns `None` when fewer than two stops
/// exist, meaning there is nothing to route. When the stop count exceeds
/// `max_stops`, middle stops are dropped from the tail. Origin and
/// destination are always kept, so a `max_stops` below 2 behaves as 2;
/// `dropped` only ever counts middle stops.
pub fn build<I>(
    waypoints: &[Waypoint<I>],
    max_stops: usize,
    origin: Option<GeoPoint>,
    destination: Option<GeoPoint>,
) -> Option<DirectionsRequest> {
    let mut ordered: Vec<&Waypoint<I>> = waypoints.iter().collect();
    ordered.sort_by_key(|w| w.sequence);
    let mut points = ordered.into_iter().map(|w| w.location);

    let origin = origin.or_else(|| points.next())?;
    let mut middle: Vec<GeoPoint> = points.collect();
    let destination = match destination {
        Some(destination) => destination,
        None => middle.pop()?,
    };

    let max_middle = max_stops.saturating_sub(2);
    let dropped = middle.len().saturating_sub(max_middle);
    if dropped > 0 {
        middle.truncate(max_middle);
        warn!(
            dropped,
            max_stops, "directions request exceeds stop cap, dropping trailing stops"
        );
    }

    Some(DirectionsRequest {
        origin,
        destination,
        waypoints: middle,
        truncated: dropped > 0,
        dropped,
    })
}

/// One stop-to-stop leg of a routed trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsLeg {
    pub duration_seconds: f64,
    pub distance_meters: f64,
    pub duration_text: String,
    pub distance_text: String,
    /// Seconds from departure at the origin until this leg starts.
    pub cumulative_start_offset_seconds: f64,
    /// Index into [`DirectionsRequest::stops`] of the stop this leg ends at.
    pub to_waypoint_index: usize,
}

/// Shaped provider response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    pub legs: Vec<DirectionsLeg>,
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
    pub geometry: Polyline,
}

impl Directions {
    /// Estimated seconds from departure until arrival at each stop after the
    /// origin, in stop order.
    pub fn arrival_offsets(&self) -> Vec<f64> {
        self.legs
            .iter()
            .map(|leg| leg.cumulative_start_offset_seconds + leg.duration_seconds)
            .collect()
    }
}

/// Route-service response body, as returned by OSRM.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteBody {
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub geometry: Option<String>,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteLeg {
    pub distance: f64,
    pub duration: f64,
}

/// Shape a provider response into legs.
///
/// A non-`Ok` code, a response without routes, or undecodable geometry all
/// mean "directions unavailable" and yield `None`.
pub fn shape(response: &RouteResponse) -> Option<Directions> {
    if response.code != "Ok" {
        warn!(
            code = %response.code,
            provider_message = response.message.as_deref().unwrap_or_default(),
            "directions provider returned an error"
        );
        return None;
    }

    let Some(route) = response.routes.first() else {
        warn!("directions provider returned no routes");
        return None;
    };

    let geometry = match route.geometry.as_deref() {
        Some(encoded) => match Polyline::decode(encoded, DEFAULT_PRECISION) {
            Some(polyline) => polyline,
            None => {
                warn!("directions provider returned malformed geometry");
                return None;
            }
        },
        None => Polyline::default(),
    };

    let mut offset = 0.0;
    let legs = route
        .legs
        .iter()
        .enumerate()
        .map(|(index, leg)| {
            let shaped = DirectionsLeg {
                duration_seconds: leg.duration,
                distance_meters: leg.distance,
                duration_text: duration_text(leg.duration),
                distance_text: distance_text(leg.distance),
                cumulative_start_offset_seconds: offset,
                to_waypoint_index: index + 1,
            };
            offset += leg.duration;
            shaped
        })
        .collect();

    Some(Directions {
        legs,
        total_distance_meters: route.distance,
        total_duration_seconds: route.duration,
        geometry,
    })
}

/// Parse and shape a raw JSON body. Parse failures yield `None`.
pub fn shape_json(body: &str) -> Option<Directions> {
    match serde_json::from_str::<RouteResponse>(body) {
        Ok(response) => shape(&response),
        Err(err) => {
            warn!(error = %err, "could not parse directions response");
            None
        }
    }
}

/// "850 m" below a kilometer, "1.2 km" above.
pub fn distance_text(meters: f64) -> String {
    let rounded = meters.round();
    if rounded < 1000.0 {
        format!("{} m", rounded)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// "1 min", "25 mins", "1 hr 5 mins", rounded to whole minutes.
pub fn duration_text(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round().max(1.0) as u64;
    let (hours, minutes) = (minutes / 60, minutes % 60);

    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("{} {}", n, unit)
        } else {
            format!("{} {}s", n, unit)
        }
    };

    match (hours, minutes) {
        (0, m) => plural(m, "min"),
        (h, 0) => plural(h, "hr"),
        (h, m) => format!("{} {}", plural(h, "hr"), plural(m, "min")),
    }
}
