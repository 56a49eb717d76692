//! Domain logic for the local business opportunity analyzer.
//!
//! Everything in this crate is pure: building the Overpass query for a
//! location, tallying returned elements by business category, and ranking
//! categories into opportunity suggestions. Network access lives in
//! `bizgap-osm`.

pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod error;
pub mod query;
pub mod rank;
pub mod report;
pub mod sequence;
pub mod thresholds;
pub mod types;

pub use aggregate::{category_of, group_by_category};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_USER_AGENT};
pub use error::{ConfigError, CoreError};
pub use query::{build_overpass_query, CATEGORY_TAG_KEYS};
pub use rank::{rank, OpportunityTier, Suggestion};
pub use report::{AnalysisReport, CategoryTotal, TOP_CATEGORY_LIMIT};
pub use sequence::{ResponseSequencer, Ticket};
pub use thresholds::{load_thresholds, ThresholdPair, ThresholdTable};
pub use types::{CategoryCounts, Coordinate, ElementKind, GeoElement, OverpassResponse, SearchRadius};
