//! Provenance log attached to every semantic element.

use serde::Serialize;

/// One recorded classification event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Pipeline step that produced the entry
    pub origin: String,

    /// Human-readable note
    pub message: String,
}

/// Append-only history of the pipeline steps applied across an element's
/// lineage. Derived elements start from a copy of their predecessor's log,
/// so the first N entries of a reclassified element always equal the
/// predecessor's N entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingLog {
    entries: Vec<LogEntry>,
}

impl ProcessingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry.
    pub fn record(&mut self, origin: impl Into<String>, message: impl Into<String>) {
        self.entries.push(LogEntry {
            origin: origin.into(),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_in_order() {
        let mut log = ProcessingLog::new();
        log.record("StepA", "first");
        log.record("StepB", "second");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].origin, "StepA");
        assert_eq!(log.entries()[1].message, "second");
    }

    #[test]
    fn test_clone_preserves_prefix() {
        let mut log = ProcessingLog::new();
        log.record("StepA", "first");
        let mut derived = log.clone();
        derived.record("StepB", "second");
        assert_eq!(derived.entries()[..log.len()], *log.entries());
        assert_eq!(log.len(), 1);
    }
}
