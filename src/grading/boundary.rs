use serde::Serialize;
use std::collections::HashSet;

use crate::error::BoundaryError;
use crate::grading::{MARK_MAX, MARK_MIN};

/// Default table: A≥90, B≥80, C≥70, D≥60, F≥0.
const DEFAULT_BOUNDARIES: &[(&str, f64)] = &[
    ("A", 90.0),
    ("B", 80.0),
    ("C", 70.0),
    ("D", 60.0),
    ("F", 0.0),
];

/// A letter grade and the minimum average (inclusive) that earns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Boundary {
    pub letter: String,
    pub minimum: f64,
}

/// One line of the grading-scale legend: `letter: lower - upper`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleBand {
    pub letter: String,
    pub lower: f64,
    pub upper: f64,
}

/// A validated grade boundary table, held highest minimum first.
///
/// Letters are unique, minimums are distinct and within the mark range, and
/// the lowest minimum is exactly 0 so every non-negative average lands in
/// some band.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeBoundaries {
    bands: Vec<Boundary>,
}

impl GradeBoundaries {
    /// Builds a table from `(letter, minimum)` pairs in any order.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundaryError`] if the pairs break any of the table
    /// invariants.
    pub fn new<I, S>(pairs: I) -> Result<Self, BoundaryError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut bands = Vec::new();

        for (letter, minimum) in pairs {
            let letter: String = letter.into();
            let letter = letter.trim().to_string();
            if letter.is_empty() {
                return Err(BoundaryError::BlankLetter);
            }
            if !(MARK_MIN..=MARK_MAX).contains(&minimum) {
                return Err(BoundaryError::InvalidMinimum { letter, minimum });
            }
            if !seen.insert(letter.clone()) {
                return Err(BoundaryError::DuplicateLetter { letter });
            }
            bands.push(Boundary { letter, minimum });
        }

        bands.sort_by(|a, b| b.minimum.total_cmp(&a.minimum));

        if let Some(pair) = bands.windows(2).find(|w| w[0].minimum == w[1].minimum) {
            return Err(BoundaryError::DuplicateMinimum {
                first: pair[0].letter.clone(),
                second: pair[1].letter.clone(),
                minimum: pair[0].minimum,
            });
        }

        let Some(lowest) = bands.last().map(|b| b.minimum) else {
            return Err(BoundaryError::Empty);
        };
        if lowest != 0.0 {
            return Err(BoundaryError::MissingFloor { lowest });
        }

        Ok(Self { bands })
    }

    /// Bands from the highest minimum to the lowest.
    pub fn iter(&self) -> impl Iterator<Item = &Boundary> {
        self.bands.iter()
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Legend bands, highest first. The top band runs to 100; every other
    /// band stops one below the minimum of the band above it.
    pub fn scale(&self) -> Vec<ScaleBand> {
        self.bands
            .iter()
            .enumerate()
            .map(|(i, band)| {
                let upper = if i == 0 {
                    MARK_MAX
                } else {
                    self.bands[i - 1].minimum - 1.0
                };
                ScaleBand {
                    letter: band.letter.clone(),
                    lower: band.minimum,
                    upper,
                }
            })
            .collect()
    }
}

impl Default for GradeBoundaries {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BOUNDARIES
                .iter()
                .map(|(letter, minimum)| Boundary {
                    letter: (*letter).to_string(),
                    minimum: *minimum,
                })
                .collect(),
        }
    }
}
