//! CSV output sink for generated telemetry.

use crate::error::Result;
use crate::metrics::MetricRecord;
use std::fs::File;
use std::path::Path;

/// Output column order, fixed.
const HEADER: [&str; 10] = [
    "timestamp",
    "device_id",
    "device_type",
    "system_uptime",
    "cpu_usage",
    "memory_usage",
    "inbound_traffic",
    "outbound_traffic",
    "input_errors",
    "output_errors",
];

/// Streaming CSV writer for metric records.
///
/// The header is written at creation, so even a run over an empty roster
/// produces a valid header-only file. Missing metric values render as empty
/// fields.
pub struct CsvSink {
    writer: csv::Writer<File>,
    rows_written: u64,
}

impl CsvSink {
    /// Creates the output file and writes the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(HEADER)?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Appends one record as a data row.
    pub fn append(&mut self, record: &MetricRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of data rows written so far (excluding the header).
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flushes and closes the sink.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricGenerator;
    use crate::roster::DeviceDescriptor;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let device = DeviceDescriptor {
            device_id: "a".to_string(),
            device_type: "x".to_string(),
        };
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let mut gen = MetricGenerator::new(42);
        let records = gen.generate(&device, start, 3);

        let mut sink = CsvSink::create(&path).unwrap();
        for record in &records {
            sink.append(record).unwrap();
        }
        assert_eq!(sink.finish().unwrap(), 3);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "timestamp,device_id,device_type,system_uptime,cpu_usage,memory_usage,\
             inbound_traffic,outbound_traffic,input_errors,output_errors"
        );
        assert!(lines[1].starts_with("2024-03-01 00:00:30,a,x,"));
    }

    #[test]
    fn test_empty_run_is_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let sink = CsvSink::create(&path).unwrap();
        assert_eq!(sink.finish().unwrap(), 0);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_missing_values_render_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let record = MetricRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 30).unwrap(),
            device_id: "a".to_string(),
            device_type: "x".to_string(),
            system_uptime: 21_000,
            cpu_usage: None,
            memory_usage: Some(55.5),
            inbound_traffic: None,
            outbound_traffic: Some(180_000),
            input_errors: 0,
            output_errors: 1,
        };

        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&record).unwrap();
        sink.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let data_line = content.lines().nth(1).unwrap();
        assert_eq!(
            data_line,
            "2024-03-01 00:00:30,a,x,21000,,55.5,,180000,0,1"
        );
    }
}
