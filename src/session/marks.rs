use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::error::ValidationError;
use crate::grading::{MARK_MAX, MARK_MIN};

/// Module name to mark, kept in insertion order.
///
/// Names are case-sensitive unique keys. Writing an existing name replaces
/// its mark in place (last write wins) without moving it. Every stored mark
/// lies within `0..=100`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleMarks {
    entries: Vec<(String, f64)>,
}

impl ModuleMarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `mark` under `module`, returning the mark it replaced.
    ///
    /// # Errors
    ///
    /// `EmptyField` for a blank module name, `OutOfRange` for a mark outside
    /// `0..=100` (including NaN). Nothing is written on error.
    pub fn insert(
        &mut self,
        module: impl Into<String>,
        mark: f64,
    ) -> Result<Option<f64>, ValidationError> {
        let module = module.into();
        if module.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "module name",
            });
        }
        if !(MARK_MIN..=MARK_MAX).contains(&mark) {
            return Err(ValidationError::OutOfRange { value: mark });
        }

        match self.entries.iter_mut().find(|(name, _)| *name == module) {
            Some((_, existing)) => Ok(Some(std::mem::replace(existing, mark))),
            None => {
                self.entries.push((module, mark));
                Ok(None)
            }
        }
    }

    pub fn get(&self, module: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == module)
            .map(|(_, mark)| *mark)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, mark)| *mark)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, mark)| (name.as_str(), *mark))
    }
}

impl Serialize for ModuleMarks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, mark) in &self.entries {
            map.serialize_entry(name, mark)?;
        }
        map.end()
    }
}
