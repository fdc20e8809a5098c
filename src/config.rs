//! Grade boundary configuration.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::grading::GradeBoundaries;

/// Environment variable naming a boundary file when no path is given on the
/// command line.
pub const BOUNDARIES_ENV: &str = "GRADEBOOK_BOUNDARIES";

/// Maps letter grades to their minimum average, ordered by letter.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "A": 90,
///   "B": 80,
///   "C": 70,
///   "D": 60,
///   "F": 0
/// }
/// ```
pub struct GradingConfig {
    entries: BTreeMap<String, f64>,
}

impl GradingConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading grade boundaries from {path}"))?;
        Self::from_json(&content).with_context(|| format!("parsing grade boundaries in {path}"))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let entries: BTreeMap<String, f64> = serde_json::from_str(content)?;
        Ok(Self { entries })
    }

    /// Validates the entries into a boundary table.
    pub fn boundaries(&self) -> Result<GradeBoundaries> {
        let pairs = self.entries.iter().map(|(k, v)| (k.as_str(), *v));
        Ok(GradeBoundaries::new(pairs)?)
    }

    /// Picks the boundary table for this run: `path` if given, else the file
    /// named by [`BOUNDARIES_ENV`], else the built-in default.
    pub fn resolve(path: Option<&str>) -> Result<GradeBoundaries> {
        let from_env = std::env::var(BOUNDARIES_ENV).ok();
        match path.or(from_env.as_deref()) {
            Some(path) => {
                let boundaries = Self::load(path)?.boundaries()?;
                info!(path, bands = boundaries.len(), "Loaded grade boundaries");
                Ok(boundaries)
            }
            None => {
                debug!("Using default grade boundaries");
                Ok(GradeBoundaries::default())
            }
        }
    }
}
