//! Boarding/exiting classification for RFID and manual scans.

use chrono::Timelike;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::GeoPoint;
use crate::geofence::{self, Zone, ZoneKind};

/// Local hours before this count as the morning run.
const MORNING_CUTOFF_HOUR: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceType {
    Boarding,
    Exiting,
}

/// What a classification was based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationBasis {
    Zone(ZoneKind),
    /// No zone matched; the time-of-day fallback decided.
    TimeOfDay,
}

/// A single scan to classify.
///
/// `timestamp` must already be in the route's local time; only its hour is
/// read, and only when no zone matches.
#[derive(Debug, Clone)]
pub struct ScanEvent<I, T> {
    pub location: GeoPoint,
    pub timestamp: T,
    /// Zones in priority order (schools before homes).
    pub candidate_zones: Vec<Zone<I>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification<I> {
    pub attendance_type: AttendanceType,
    /// Id of the zone that decided, if one matched.
    pub zone_id: Option<I>,
    pub basis: ClassificationBasis,
}

/// Decide boarding vs exiting from a matched zone, falling back to time of day.
///
/// Inside a destination zone means exiting, inside a source zone means
/// boarding. Without a match, scans before noon are treated as boarding and
/// the rest as exiting. The fallback is a coarse morning/afternoon
/// approximation, not a validated inference.
pub fn resolve<I, T: Timelike>(matched: Option<&Zone<I>>, timestamp: &T) -> AttendanceType {
    match matched.map(|zone| zone.kind) {
        Some(ZoneKind::Destination) => AttendanceType::Exiting,
        Some(ZoneKind::Source) => AttendanceType::Boarding,
        None => by_time_of_day(timestamp),
    }
}

fn by_time_of_day<T: Timelike>(timestamp: &T) -> AttendanceType {
    if timestamp.hour() < MORNING_CUTOFF_HOUR {
        AttendanceType::Boarding
    } else {
        AttendanceType::Exiting
    }
}

/// Match the scan against its candidate zones and resolve the result.
pub fn classify<I: Clone, T: Timelike>(event: &ScanEvent<I, T>) -> Classification<I> {
    let matched = geofence::match_zone(event.location, &event.candidate_zones);
    let attendance_type = resolve(matched, &event.timestamp);

    match matched {
        Some(zone) => Classification {
            attendance_type,
            zone_id: Some(zone.id.clone()),
            basis: ClassificationBasis::Zone(zone.kind),
        },
        None => {
            debug!(
                zones = event.candidate_zones.len(),
                hour = event.timestamp.hour(),
                ?attendance_type,
                "no zone matched scan, using time-of-day fallback"
            );
            Classification {
                attendance_type,
                zone_id: None,
                basis: ClassificationBasis::TimeOfDay,
            }
        }
    }
}

/// Classify a batch of scans in parallel. Output order matches input order.
pub fn classify_all<I, T>(events: &[ScanEvent<I, T>]) -> Vec<Classification<I>>
where
    I: Clone + Send + Sync,
    T: Timelike + Sync,
{
    events.par_iter().map(classify).collect()
}
