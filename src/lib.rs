//! Live map feed for geolocated service complaints: polls a ticket backend,
//! flattens nested tickets into deduplicated map markers, and resolves
//! "selected ticket" references to the marker whose popup should open.

pub mod feed;
pub mod model;
pub mod normalize;
pub mod remote;
pub mod resolve;
pub mod stats;
pub mod surface;
