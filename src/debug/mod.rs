//! Load telemetry.
//!
//! A [`LoadCollector`] attached to an [`Autoloader`](crate::registry::Autoloader)
//! receives one [`LoadRecord`] per load attempt. Rendering the data is left
//! to the consumer.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::base::{SymbolName, normalize_name};

/// One symbol load attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRecord {
    /// The symbol that was requested.
    pub symbol: SymbolName,
    /// The file it resolved to, if any.
    pub file: Option<PathBuf>,
    pub start: SystemTime,
    pub end: SystemTime,
    /// Whether the load hook ran.
    pub loaded: bool,
}

impl LoadRecord {
    /// Time spent resolving and loading. Zero if the clock went backwards.
    pub fn duration(&self) -> Duration {
        self.end.duration_since(self.start).unwrap_or_default()
    }
}

/// Collects load records in the order they happen.
#[derive(Clone, Debug, Default)]
pub struct LoadCollector {
    name: String,
    records: Vec<LoadRecord>,
}

impl LoadCollector {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record(&mut self, record: LoadRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[LoadRecord] {
        &self.records
    }

    /// First record whose resolved file is `file`.
    pub fn record_by_file(&self, file: &Path) -> Option<&LoadRecord> {
        self.records.iter().find(|r| r.file.as_deref() == Some(file))
    }

    /// First record for `symbol`.
    pub fn record_by_symbol(&self, symbol: &str) -> Option<&LoadRecord> {
        let symbol = normalize_name(symbol);
        self.records.iter().find(|r| r.symbol.as_str() == symbol)
    }

    /// Sum of all record durations.
    pub fn total_duration(&self) -> Duration {
        self.records.iter().map(LoadRecord::duration).sum()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(symbol: &str, file: Option<&str>, millis: u64) -> LoadRecord {
        let start = SystemTime::UNIX_EPOCH;
        LoadRecord {
            symbol: SymbolName::new(symbol),
            file: file.map(PathBuf::from),
            start,
            end: start + Duration::from_millis(millis),
            loaded: file.is_some(),
        }
    }

    #[test]
    fn test_lookup_by_file_and_symbol() {
        let mut collector = LoadCollector::new("default");
        collector.record(make_record("Foo\\Bar", Some("/src/Bar.php"), 2));
        collector.record(make_record("Foo\\Missing", None, 1));

        assert_eq!(collector.name(), "default");
        assert_eq!(collector.len(), 2);
        assert!(collector.record_by_file(Path::new("/src/Bar.php")).unwrap().loaded);
        assert!(!collector.record_by_symbol("\\Foo\\Missing").unwrap().loaded);
        assert!(collector.record_by_symbol("Foo\\Other").is_none());
    }

    #[test]
    fn test_durations() {
        let mut collector = LoadCollector::new("default");
        collector.record(make_record("A", None, 3));
        collector.record(make_record("B", None, 4));

        assert_eq!(collector.records()[0].duration(), Duration::from_millis(3));
        assert_eq!(collector.total_duration(), Duration::from_millis(7));
    }

    #[test]
    fn test_backwards_clock_is_zero() {
        let mut record = make_record("A", None, 0);
        record.start = SystemTime::UNIX_EPOCH + Duration::from_secs(1);

        assert_eq!(record.duration(), Duration::ZERO);
    }
}
