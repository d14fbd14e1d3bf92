//! Addis Ababa locations for realistic fixtures.
//!
//! Coordinates are approximate neighbourhood centres, good to a few hundred
//! meters.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> transit_planner::geo::GeoPoint {
        transit_planner::geo::GeoPoint::new(self.lat, self.lng)
    }
}

// ============================================================================
// Schools (destination zones)
// ============================================================================

pub const SCHOOLS: &[Location] = &[
    Location::new("Sidist Kilo Campus", 9.0450, 38.7620),
    Location::new("Bole Community School", 8.9960, 38.7890),
];

// ============================================================================
// Residential neighbourhoods (pickup areas / source zones)
// ============================================================================

pub const NEIGHBOURHOODS: &[Location] = &[
    Location::new("Meskel Square", 9.0108, 38.7613),
    Location::new("Piassa", 9.0359, 38.7523),
    Location::new("Merkato", 9.0300, 38.7400),
    Location::new("Arat Kilo", 9.0330, 38.7630),
    Location::new("Megenagna", 9.0200, 38.8000),
    Location::new("CMC", 9.0180, 38.8500),
    Location::new("Gerji", 8.9970, 38.8080),
    Location::new("Sarbet", 8.9960, 38.7360),
];

/// Depot where buses park overnight.
pub const DEPOT: Location = Location::new("Lideta Depot", 9.0050, 38.7370);
