//! Core domain traits for the transit planner.
//!
//! These are intentionally minimal. The surrounding application implements
//! them for its own records; the planner never reads or writes storage.

use std::hash::Hash;

use crate::directions::{Directions, DirectionsRequest};
use crate::geo::GeoPoint;

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A rider waiting for a stop assignment on a route.
pub trait Pickup {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Stored pickup coordinates. `None` when the rider has no location on
    /// record; such pickups are excluded from clustering and reported back
    /// as unclusterable.
    fn location(&self) -> Option<GeoPoint>;
}

/// Turns an ordered stop list into turn-by-turn leg data.
///
/// Implementations own the network call, timeout included. Any failure is
/// reported as `None` ("directions unavailable"), never as an error, since
/// the stop ordering stays usable without it.
pub trait DirectionsProvider {
    fn directions_for(&self, request: &DirectionsRequest) -> Option<Directions>;
}
