//! Circular zone matching.
//!
//! Zone lists per call are small, so matching is a plain linear scan in the
//! order the caller supplies. The first containing zone wins, not the nearest
//! one: callers list higher-priority zones (schools) before lower-priority
//! ones (homes) so that overlaps resolve toward exiting.

use serde::{Deserialize, Serialize};

use crate::geo::{self, GeoPoint};

/// What a zone stands for in the transport domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    /// A rider's home: being here means entering transit.
    Source,
    /// The school: being here means leaving transit.
    Destination,
}

/// A named circular geofence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone<I> {
    pub id: I,
    pub kind: ZoneKind,
    pub center: GeoPoint,
    pub radius_meters: f64,
}

impl<I> Zone<I> {
    pub fn new(id: I, kind: ZoneKind, center: GeoPoint, radius_meters: f64) -> Self {
        Self {
            id,
            kind,
            center,
            radius_meters,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        geo::is_within(point, self.center, self.radius_meters)
    }
}

/// First zone in `zones` containing `point`, if any.
pub fn match_zone<I>(point: GeoPoint, zones: &[Zone<I>]) -> Option<&Zone<I>> {
    zones.iter().find(|zone| zone.contains(point))
}

/// Every zone containing `point`, in list order.
///
/// Useful for spotting overlapping configurations; classification only ever
/// looks at the first entry.
pub fn zones_containing<I>(point: GeoPoint, zones: &[Zone<I>]) -> Vec<&Zone<I>> {
    zones.iter().filter(|zone| zone.contains(point)).collect()
}
