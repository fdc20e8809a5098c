use crate::session::StudentRecord;

/// Finalized records keyed by student name, in first-finalized order.
///
/// Re-finalizing a name replaces the whole record but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record`, returning the record it superseded.
    pub fn upsert(&mut self, record: StudentRecord) -> Option<StudentRecord> {
        match self
            .records
            .iter_mut()
            .find(|r| r.student_name == record.student_name)
        {
            Some(existing) => Some(std::mem::replace(existing, record)),
            None => {
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, student_name: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.student_name == student_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
