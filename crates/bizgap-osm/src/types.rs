//! Nominatim response types.

use bizgap_core::Coordinate;
use serde::{Deserialize, Serialize};

use crate::OsmError;

/// One place returned by a Nominatim `search` call.
///
/// Nominatim encodes coordinates and the bounding box as decimal strings;
/// they are kept verbatim and parsed on demand by [`GeocodeCandidate::coordinate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub place_id: u64,
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    /// `[south, north, west, east]`.
    #[serde(default)]
    pub boundingbox: Vec<String>,
}

impl GeocodeCandidate {
    /// # Errors
    ///
    /// Returns [`OsmError::InvalidCandidate`] if `lat`/`lon` are not valid decimal degrees.
    pub fn coordinate(&self) -> Result<Coordinate, OsmError> {
        let invalid = || OsmError::InvalidCandidate {
            place_id: self.place_id,
            lat: self.lat.clone(),
            lon: self.lon.clone(),
        };
        let lat = self.lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let lon = self.lon.trim().parse::<f64>().map_err(|_| invalid())?;
        Coordinate::new(lat, lon).map_err(|_| invalid())
    }
}
