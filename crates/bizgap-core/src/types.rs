//! Value types shared by the query builder, aggregator, and ranker.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Business category name mapped to the number of elements carrying it.
///
/// Ordered so that iteration (and therefore ranking of equal-ratio
/// categories) is deterministic.
pub type CategoryCounts = BTreeMap<String, u32>;

/// A validated WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] when either value is not
    /// finite or falls outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoreError> {
        let reject = |reason| Err(CoreError::InvalidCoordinate { lat, lon, reason });
        if !lat.is_finite() || !lon.is_finite() {
            return reject("latitude and longitude must be finite numbers");
        }
        if !(-90.0..=90.0).contains(&lat) {
            return reject("latitude must be within [-90, 90]");
        }
        if !(-180.0..=180.0).contains(&lon) {
            return reject("longitude must be within [-180, 180]");
        }
        Ok(Self { lat, lon })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Search radius around a [`Coordinate`], in metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SearchRadius(NonZeroU32);

impl SearchRadius {
    /// Radius the map widget starts with.
    pub const DEFAULT_METRES: u32 = 500;
    /// Lower bound of the interactive radius slider.
    pub const MIN_SLIDER_METRES: u32 = 100;
    /// Upper bound of the interactive radius slider.
    pub const MAX_SLIDER_METRES: u32 = 2000;

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRadius`] for zero.
    pub fn new(metres: u32) -> Result<Self, CoreError> {
        NonZeroU32::new(metres)
            .map(Self)
            .ok_or(CoreError::InvalidRadius(metres))
    }

    #[must_use]
    pub fn metres(self) -> u32 {
        self.0.get()
    }

    /// Clamps into the slider bounds. The core itself imposes no upper limit;
    /// interactive front-ends use this to mirror the map widget.
    #[must_use]
    pub fn clamp_to_slider(self) -> Self {
        let clamped = self
            .metres()
            .clamp(Self::MIN_SLIDER_METRES, Self::MAX_SLIDER_METRES);
        // MIN_SLIDER_METRES is non-zero, so the clamped value is too.
        Self(NonZeroU32::new(clamped).unwrap_or(self.0))
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(NonZeroU32::new(Self::DEFAULT_METRES).unwrap_or(NonZeroU32::MIN))
    }
}

impl TryFrom<u32> for SearchRadius {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SearchRadius> for u32 {
    fn from(value: SearchRadius) -> Self {
        value.metres()
    }
}

impl std::fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Overpass element type. Missing or unrecognised values map to `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
    #[default]
    #[serde(other)]
    Other,
}

/// One element of an Overpass `out json` response.
///
/// Skeleton output (`out skel`) carries no tags, so `tags` is optional.
/// Fields beyond the ones modelled here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoElement {
    #[serde(rename = "type", default)]
    pub kind: ElementKind,
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// Node ids referenced by a way.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

impl GeoElement {
    /// Position of the element, when the response included one and it is valid.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(self.lat?, self.lon?).ok()
    }

    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.as_ref()?.get(key).map(String::as_str)
    }
}

/// Top-level Overpass JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    pub elements: Vec<GeoElement>,
}
