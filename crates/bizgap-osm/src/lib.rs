//! Clients for the public OpenStreetMap services the analyzer depends on:
//! Nominatim for place search and Overpass for tagged elements around a point.

pub mod error;
mod http;
pub mod nominatim;
pub mod overpass;
pub mod types;

pub use error::OsmError;
pub use nominatim::NominatimClient;
pub use overpass::OverpassClient;
pub use types::GeocodeCandidate;
