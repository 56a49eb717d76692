//! Overpass QL query construction.

use std::fmt::Write as _;

use crate::types::{Coordinate, SearchRadius};

/// Tag keys that mark an element as a business, in category priority order.
pub const CATEGORY_TAG_KEYS: [&str; 5] = ["shop", "amenity", "tourism", "leisure", "office"];

/// Server-side timeout requested in the query header, in seconds.
pub const QUERY_TIMEOUT_SECS: u32 = 25;

const ELEMENT_TYPES: [&str; 2] = ["node", "way"];

/// Builds the Overpass QL query selecting every node and way tagged with one
/// of [`CATEGORY_TAG_KEYS`] within `radius` metres of `center`.
///
/// Matched elements are returned with full tags (`out body`), followed by the
/// skeleton of everything they reference (`>; out skel qt`) so way geometry
/// resolves. Inputs are typed, so nothing but numbers reaches the query text.
#[must_use]
pub fn build_overpass_query(center: Coordinate, radius: SearchRadius) -> String {
    let mut query = format!("[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n(\n");
    for element_type in ELEMENT_TYPES {
        for key in CATEGORY_TAG_KEYS {
            // Writing into a String cannot fail.
            let _ = writeln!(
                query,
                "  {element_type}[\"{key}\"](around:{radius},{lat},{lon});",
                radius = radius.metres(),
                lat = center.lat,
                lon = center.lon,
            );
        }
    }
    query.push_str(");\nout body;\n>;\nout skel qt;\n");
    query
}
