//! Route stop optimization: clustering followed by sequencing.

use rayon::prelude::*;
use tracing::info;

use crate::cluster::cluster;
use crate::directions::{self, DEFAULT_MAX_STOPS, DirectionsRequest};
use crate::geo::GeoPoint;
use crate::sequence::{self, Waypoint};
use crate::traits::Pickup;

#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Pickups within this distance of a stop's centroid share the stop.
    pub zone_radius_km: f64,
    /// Stop cap of the directions provider, origin and destination included.
    pub max_directions_stops: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            zone_radius_km: 0.5,
            max_directions_stops: DEFAULT_MAX_STOPS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteOptimization<PickupId> {
    pub waypoints: Vec<Waypoint<PickupId>>,
    /// Pickups left out for missing or invalid coordinates, in input order.
    pub unclusterable: Vec<PickupId>,
    max_directions_stops: usize,
}

impl<PickupId: Clone> RouteOptimization<PickupId> {
    /// True when no stop could be placed. Check [`Self::unclusterable`] to
    /// tell "no riders" from "no riders with coordinates".
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn unclusterable_count(&self) -> usize {
        self.unclusterable.len()
    }

    /// Pickup order for every clustered rider. Riders sharing a stop share
    /// the order value.
    pub fn pickup_orders(&self) -> Vec<(PickupId, usize)> {
        self.waypoints
            .iter()
            .flat_map(|w| w.members.iter().map(move |id| (id.clone(), w.sequence)))
            .collect()
    }

    pub fn hop_distance_km(&self) -> f64 {
        sequence::hop_distance_km(&self.waypoints)
    }

    /// Directions request for the computed stops, capped at the configured
    /// stop limit.
    pub fn directions_request(
        &self,
        origin: Option<GeoPoint>,
        destination: Option<GeoPoint>,
    ) -> Option<DirectionsRequest> {
        directions::build(&self.waypoints, self.max_directions_stops, origin, destination)
    }
}

/// Cluster `pickups` into stops and order them.
pub fn optimize<P: Pickup>(pickups: &[P], options: &OptimizeOptions) -> RouteOptimization<P::Id> {
    let outcome = cluster(pickups, options.zone_radius_km);
    let waypoints = sequence::sequence(&outcome.clusters);

    let unclusterable: Vec<P::Id> = pickups
        .iter()
        .filter(|p| !p.location().is_some_and(|loc| loc.is_valid()))
        .map(|p| p.id().clone())
        .collect();

    info!(
        pickups = pickups.len(),
        stops = waypoints.len(),
        unclusterable = unclusterable.len(),
        "optimized route"
    );

    RouteOptimization {
        waypoints,
        unclusterable,
        max_directions_stops: options.max_directions_stops,
    }
}

/// Optimize several independent routes in parallel.
///
/// Results are returned in input order, keyed by the caller's route id.
/// Nothing is shared between routes; two entries for the same route are
/// optimized independently.
pub fn optimize_routes<R, P>(
    routes: &[(R, Vec<P>)],
    options: &OptimizeOptions,
) -> Vec<(R, RouteOptimization<P::Id>)>
where
    R: Clone + Send + Sync,
    P: Pickup + Sync,
    P::Id: Send,
{
    routes
        .par_iter()
        .map(|(route_id, pickups)| (route_id.clone(), optimize(pickups, options)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rider {
        id: u32,
        location: Option<GeoPoint>,
    }

    impl Pickup for Rider {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn location(&self) -> Option<GeoPoint> {
            self.location
        }
    }

    fn rider(id: u32, lat: f64, lng: f64) -> Rider {
        Rider {
            id,
            location: Some(GeoPoint::new(lat, lng)),
        }
    }

    #[test]
    fn test_pickup_orders_share_stop_order() {
        let riders = vec![rider(1, 9.010, 38.761), rider(2, 9.011, 38.762), rider(3, 9.300, 38.900)];
        let result = optimize(&riders, &OptimizeOptions::default());
        let mut orders = result.pickup_orders();
        orders.sort();
        assert_eq!(orders, vec![(1, 0), (2, 0), (3, 1)]);
    }

    #[test]
    fn test_unclusterable_ids_are_reported() {
        let riders = vec![
            Rider { id: 1, location: None },
            rider(2, 9.0, 38.7),
            rider(3, 200.0, 38.7),
        ];
        let result = optimize(&riders, &OptimizeOptions::default());
        assert_eq!(result.unclusterable, vec![1, 3]);
        assert_eq!(result.unclusterable_count(), 2);
        assert_eq!(result.waypoints.len(), 1);
    }

    #[test]
    fn test_directions_request_uses_configured_cap() {
        let riders: Vec<Rider> = (0..10).map(|i| rider(i, 9.0 + i as f64 * 0.1, 38.7)).collect();
        let options = OptimizeOptions {
            max_directions_stops: 5,
            ..OptimizeOptions::default()
        };
        let result = optimize(&riders, &options);
        let request = result.directions_request(None, None).unwrap();
        assert_eq!(request.waypoints.len(), 3);
        assert_eq!(request.dropped, 5);
    }

    #[test]
    fn test_optimize_routes_keeps_input_order() {
        let routes = vec![
            ("morning", vec![rider(1, 9.0, 38.7), rider(2, 9.2, 38.7)]),
            ("empty", Vec::new()),
            ("afternoon", vec![rider(3, 9.0, 38.7)]),
        ];
        let results = optimize_routes(&routes, &OptimizeOptions::default());
        let summary: Vec<_> = results.iter().map(|(id, r)| (*id, r.waypoints.len())).collect();
        assert_eq!(summary, vec![("morning", 2), ("empty", 0), ("afternoon", 1)]);
        assert!(results[1].1.is_empty());
    }
}
