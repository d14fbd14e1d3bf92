//! Proximity clustering of pickup points into shared stops.
//!
//! Two greedy phases, both order dependent:
//!
//! 1. First-fit: each valid pickup, in input order, joins the first cluster
//!    (in creation order) whose current centroid is within the radius, even
//!    if a later cluster is closer. The centroid is kept as a running mean.
//! 2. Merge: recentering in phase 1 can drift two centroids within range of
//!    each other. The first such pair (lowest indices) is merged, later into
//!    earlier, and the scan restarts until a full pass finds nothing.
//!
//! Members are only guaranteed to be within the radius of the centroid at
//! the moment they joined.

use tracing::debug;

use crate::geo::{self, GeoPoint};
use crate::traits::Pickup;

/// A group of pickups collapsed into one physical stop.
#[derive(Debug, Clone)]
pub struct Cluster<'a, P> {
    pub centroid: GeoPoint,
    pub members: Vec<&'a P>,
}

impl<'a, P> Cluster<'a, P> {
    fn singleton(pickup: &'a P, location: GeoPoint) -> Self {
        Self {
            centroid: location,
            members: vec![pickup],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add a member and fold its location into the running mean.
    fn absorb(&mut self, pickup: &'a P, location: GeoPoint) {
        let n = self.members.len() as f64;
        self.centroid = GeoPoint::weighted_mean(self.centroid, n, location, 1.0);
        self.members.push(pickup);
    }

    /// Merge `other` into `self`, weighting each centroid by member count.
    fn merge(&mut self, other: Cluster<'a, P>) {
        self.centroid = GeoPoint::weighted_mean(
            self.centroid,
            self.members.len() as f64,
            other.centroid,
            other.members.len() as f64,
        );
        self.members.extend(other.members);
    }
}

/// Result of a clustering run.
#[derive(Debug, Clone)]
pub struct ClusterOutcome<'a, P> {
    pub clusters: Vec<Cluster<'a, P>>,
    /// Pickups skipped for missing or invalid coordinates.
    pub unclusterable: usize,
}

impl<P> ClusterOutcome<'_, P> {
    /// Number of pickups placed into some cluster.
    pub fn clustered(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }
}

/// Group `pickups` into clusters of radius `zone_radius_km`.
pub fn cluster<P: Pickup>(pickups: &[P], zone_radius_km: f64) -> ClusterOutcome<'_, P> {
    let mut clusters: Vec<Cluster<'_, P>> = Vec::new();
    let mut unclusterable = 0;

    for pickup in pickups {
        let Some(location) = pickup.location().filter(GeoPoint::is_valid) else {
            unclusterable += 1;
            continue;
        };

        let fit = clusters
            .iter()
            .position(|c| geo::distance_km(location, c.centroid) <= zone_radius_km);

        match fit {
            Some(index) => clusters[index].absorb(pickup, location),
            None => clusters.push(Cluster::singleton(pickup, location)),
        }
    }

    let first_fit = clusters.len();
    let merges = merge_until_stable(&mut clusters, zone_radius_km);

    debug!(
        pickups = pickups.len(),
        unclusterable,
        first_fit,
        merges,
        clusters = clusters.len(),
        zone_radius_km,
        "clustered pickups"
    );

    ClusterOutcome {
        clusters,
        unclusterable,
    }
}

/// Merge clusters whose centroids are within range until none are.
///
/// Every merge removes a cluster, so this ends after at most `len - 1`
/// merges. Returns the number of merges performed.
fn merge_until_stable<P>(clusters: &mut Vec<Cluster<'_, P>>, zone_radius_km: f64) -> usize {
    let mut merges = 0;
    while let Some((i, j)) = first_mergeable_pair(clusters, zone_radius_km) {
        let absorbed = clusters.remove(j);
        clusters[i].merge(absorbed);
        merges += 1;
    }
    merges
}

fn first_mergeable_pair<P>(
    clusters: &[Cluster<'_, P>],
    zone_radius_km: f64,
) -> Option<(usize, usize)> {
    for i in 0..clusters.len() {
        for j in i + 1..clusters.len() {
            if geo::distance_km(clusters[i].centroid, clusters[j].centroid) <= zone_radius_km {
                return Some((i, j));
            }
        }
    }
    None
}
