//! Test fixtures for transit-planner.
//!
//! Provides:
//! - Addis Ababa neighbourhood and school locations
//! - A builder-style pickup record implementing the `Pickup` trait

pub mod addis_ababa_locations;

pub use addis_ababa_locations::*;

use transit_planner::geo::GeoPoint;
use transit_planner::traits::Pickup;

/// Rider record as the host application would load it.
#[derive(Clone, Debug)]
pub struct TestPickup {
    pub id: String,
    pub location: Option<GeoPoint>,
}

impl TestPickup {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            location: None,
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.location = Some(GeoPoint::new(lat, lng));
        self
    }

    pub fn at_location(self, location: &Location) -> Self {
        self.at(location.lat, location.lng)
    }
}

impl Pickup for TestPickup {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn location(&self) -> Option<GeoPoint> {
        self.location
    }
}
