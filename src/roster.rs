//! Device roster loading.

use crate::error::{Result, SimulatorError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// A device to generate telemetry for.
///
/// Extra fields in the roster JSON are tolerated and ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub device_id: String,
    pub device_type: String,
}

/// Loads the device roster from a JSON file.
///
/// Accepts either a top-level array of device objects or an object with a
/// `devices` array field (an object without one counts as an empty roster).
/// Entries that are not objects or lack the required fields are skipped,
/// never fatal; an unreadable file or malformed JSON is.
pub fn load_roster(path: &Path) -> Result<Vec<DeviceDescriptor>> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("devices") {
            Some(Value::Array(entries)) => entries,
            Some(_) | None => Vec::new(),
        },
        _ => {
            return Err(SimulatorError::Roster(format!(
                "{}: expected a JSON array or an object with a 'devices' array",
                path.display()
            )))
        }
    };

    let mut devices = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<DeviceDescriptor>(entry) {
            Ok(device) => devices.push(device),
            Err(e) => warn!("Skipping malformed roster entry {}: {}", i, e),
        }
    }

    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_roster(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_array_roster() {
        let file = write_roster(
            r#"[{"device_id":"a","device_type":"router"},{"device_id":"b","device_type":"switch"}]"#,
        );
        let devices = load_roster(file.path()).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].device_id, "a");
        assert_eq!(devices[1].device_type, "switch");
    }

    #[test]
    fn test_load_object_roster() {
        let file = write_roster(r#"{"devices":[{"device_id":"a","device_type":"x"}]}"#);
        let devices = load_roster(file.path()).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].device_id, "a");
    }

    #[test]
    fn test_object_without_devices_is_empty() {
        let file = write_roster(r#"{"name":"fleet"}"#);
        let devices = load_roster(file.path()).unwrap();
        assert!(devices.is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let file = write_roster(
            r#"["not-a-device", {"device_id":"a","device_type":"x"}, {"device_id":"b"}, 42]"#,
        );
        let devices = load_roster(file.path()).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].device_id, "a");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let file = write_roster(r#"[{"device_id":"a","device_type":"x","site":"nyc"}]"#);
        let devices = load_roster(file.path()).unwrap();
        assert_eq!(devices.len(), 1);
    }

    #[test]
    fn test_scalar_roster_is_an_error() {
        let file = write_roster("42");
        assert!(matches!(
            load_roster(file.path()),
            Err(SimulatorError::Roster(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let file = write_roster("{not json");
        assert!(matches!(
            load_roster(file.path()),
            Err(SimulatorError::Json(_))
        ));
    }
}
