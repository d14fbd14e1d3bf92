//! Visiting order for clustered stops.
//!
//! Greedy nearest-neighbor walk starting from the member-weighted centroid
//! of all clusters. An approximation of the shortest tour, not an optimum.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cluster::Cluster;
use crate::geo::{self, GeoPoint};
use crate::traits::Pickup;

/// One ordered stop on a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint<I> {
    /// 0-based visiting index.
    pub sequence: usize,
    pub location: GeoPoint,
    /// Every pickup served at this stop; they share the same pickup order.
    pub members: Vec<I>,
}

/// Order `clusters` into waypoints.
///
/// At each step the unvisited cluster nearest to the last position wins.
/// Ties go to the cluster that appears earlier in `clusters`.
pub fn sequence<P: Pickup>(clusters: &[Cluster<'_, P>]) -> Vec<Waypoint<P::Id>> {
    let Some(start) = virtual_start(clusters) else {
        return Vec::new();
    };

    let mut visited = vec![false; clusters.len()];
    let mut waypoints = Vec::with_capacity(clusters.len());
    let mut position = start;

    for sequence in 0..clusters.len() {
        let mut best: Option<(usize, f64)> = None;
        for (index, cluster) in clusters.iter().enumerate() {
            if visited[index] {
                continue;
            }
            let distance = geo::distance_km(position, cluster.centroid);
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }

        // An unvisited cluster remains on every iteration.
        let Some((index, _)) = best else { break };
        visited[index] = true;

        let cluster = &clusters[index];
        waypoints.push(Waypoint {
            sequence,
            location: cluster.centroid,
            members: cluster.members.iter().map(|p| p.id().clone()).collect(),
        });
        position = cluster.centroid;
    }

    debug!(
        waypoints = waypoints.len(),
        hop_km = hop_distance_km(&waypoints),
        "sequenced stops"
    );

    waypoints
}

/// Member-count-weighted centroid of every cluster combined.
fn virtual_start<P>(clusters: &[Cluster<'_, P>]) -> Option<GeoPoint> {
    let mut iter = clusters.iter();
    let first = iter.next()?;
    let (start, _) = iter.fold((first.centroid, first.len() as f64), |(acc, weight), c| {
        let n = c.len() as f64;
        (GeoPoint::weighted_mean(acc, weight, c.centroid, n), weight + n)
    });
    Some(start)
}

/// Sum of straight-line hops between consecutive waypoints, in km.
pub fn hop_distance_km<I>(waypoints: &[Waypoint<I>]) -> f64 {
    waypoints
        .windows(2)
        .map(|pair| geo::distance_km(pair[0].location, pair[1].location))
        .sum()
}
