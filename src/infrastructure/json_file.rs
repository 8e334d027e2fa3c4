use crate::domain::AppointmentRecord;
use crate::infrastructure::AppointmentRepository;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Stores all appointments as one pretty-printed JSON array.
///
/// A missing file, or one that is not a JSON array, loads as an empty
/// collection. An array element that is not a `{client, scheduled_time}` object
/// is an error. Saving overwrites the file in place,
/// so a crash mid-write can leave it truncated.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn serialize(&self, records: &[AppointmentRecord]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        records
            .serialize(&mut serializer)
            .context("Failed to serialize appointments to JSON")?;
        Ok(buffer)
    }
}

impl AppointmentRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<AppointmentRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No appointments file at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read appointments from {:?}", self.path));
            }
        };

        let values = match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(values) => values,
            Err(e) => {
                log::warn!(
                    "Appointments file {:?} is not a JSON array, treating it as empty: {}",
                    self.path,
                    e
                );
                return Ok(Vec::new());
            }
        };

        let records = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value::<AppointmentRecord>(value).with_context(|| {
                    format!("Malformed appointment #{} in {:?}", index + 1, self.path)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Loaded {} appointments from {:?}", records.len(), self.path);
        Ok(records)
    }

    fn save(&self, records: &[AppointmentRecord]) -> Result<()> {
        let bytes = self.serialize(records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write appointments to {:?}", self.path))?;

        log::debug!("Saved {} appointments to {:?}", records.len(), self.path);
        Ok(())
    }
}
