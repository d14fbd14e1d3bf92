//! transit-planner core
//!
//! Geospatial attendance classification and pickup-stop routing for school
//! transport. Storage and delivery stay with the host application.

pub mod traits;
pub mod geo;
pub mod geofence;
pub mod attendance;
pub mod cluster;
pub mod sequence;
pub mod directions;
pub mod polyline;
pub mod optimizer;
pub mod osrm;
pub mod config;
