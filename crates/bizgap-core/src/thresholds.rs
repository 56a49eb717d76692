//! Competition thresholds per business category.
//!
//! A category with fewer than `low` competitors is an opportunity; at `high`
//! or more the market is considered saturated. The table is built once and
//! shared immutably.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub low: u32,
    pub high: u32,
}

impl ThresholdPair {
    #[must_use]
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }
}

/// Pair used for any category missing from the table.
pub const DEFAULT_PAIR: ThresholdPair = ThresholdPair::new(2, 5);

/// Built-in per-category thresholds.
pub const STANDARD_THRESHOLDS: &[(&str, ThresholdPair)] = &[
    ("cafe", ThresholdPair::new(3, 7)),
    ("restaurant", ThresholdPair::new(5, 10)),
    ("pub", ThresholdPair::new(2, 5)),
    ("bar", ThresholdPair::new(2, 5)),
    ("supermarket", ThresholdPair::new(1, 3)),
    ("bakery", ThresholdPair::new(1, 3)),
    ("pharmacy", ThresholdPair::new(1, 2)),
    ("clothes", ThresholdPair::new(3, 7)),
    ("hairdresser", ThresholdPair::new(2, 4)),
    ("hotel", ThresholdPair::new(2, 5)),
];

static STANDARD: LazyLock<ThresholdTable> = LazyLock::new(|| {
    ThresholdTable::from_parts(
        DEFAULT_PAIR,
        STANDARD_THRESHOLDS
            .iter()
            .map(|(name, pair)| ((*name).to_owned(), *pair)),
    )
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdTable {
    default: ThresholdPair,
    by_category: HashMap<String, ThresholdPair>,
}

/// On-disk shape of a thresholds file.
#[derive(Debug, Deserialize)]
struct ThresholdsFile {
    default: ThresholdPair,
    #[serde(default)]
    categories: HashMap<String, ThresholdPair>,
}

impl ThresholdTable {
    /// Builds a table after checking every pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a category name is blank, a
    /// threshold is zero, or `low` exceeds `high`.
    pub fn new<I>(default: ThresholdPair, categories: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, ThresholdPair)>,
    {
        validate_pair("default", default)?;
        let table = Self::from_parts(default, categories);
        for (name, pair) in &table.by_category {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "threshold category names must be non-empty".to_string(),
                ));
            }
            validate_pair(name, *pair)?;
        }
        Ok(table)
    }

    /// Unchecked; only for the built-in constants.
    fn from_parts<I>(default: ThresholdPair, categories: I) -> Self
    where
        I: IntoIterator<Item = (String, ThresholdPair)>,
    {
        Self {
            default,
            by_category: categories.into_iter().collect(),
        }
    }

    /// The built-in table, constructed on first use.
    #[must_use]
    pub fn standard() -> &'static ThresholdTable {
        &STANDARD
    }

    /// Exact-match lookup, falling back to the default pair.
    #[must_use]
    pub fn lookup(&self, category: &str) -> ThresholdPair {
        self.by_category
            .get(category)
            .copied()
            .unwrap_or(self.default)
    }

    #[must_use]
    pub fn default_pair(&self) -> ThresholdPair {
        self.default
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_category.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    /// Load and validate a thresholds table from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn from_yaml_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ThresholdsFileIo {
                path: path.display().to_string(),
                source: e,
            })?;
        Self::from_yaml_str(&content)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if the YAML cannot be parsed or fails validation.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ThresholdsFile =
            serde_yaml::from_str(content).map_err(ConfigError::ThresholdsFileParse)?;


        Self::new(file.default, file.categories)
    }
}

/// Resolve the table to use: the file at `path` when given, else the built-in one.
///
/// # Errors
///
/// Returns `ConfigError` if a path is given and loading it fails.
pub fn load_thresholds(path: Option<&Path>) -> Result<ThresholdTable, ConfigError> {
    match path {
        Some(path) => ThresholdTable::from_yaml_path(path),
        None => Ok(ThresholdTable::standard().clone()),
    }
}

fn validate_pair(name: &str, pair: ThresholdPair) -> Result<(), ConfigError> {
    if pair.low == 0 || pair.high == 0 {
        return Err(ConfigError::Validation(format!(
            "thresholds for '{name}' must be positive (got low={}, high={})",
            pair.low, pair.high
        )));
    }
    if pair.low > pair.high {
        return Err(ConfigError::Validation(format!(
            "thresholds for '{name}' have low={} above high={}",
            pair.low, pair.high
        )));
    }
    Ok(())
}
