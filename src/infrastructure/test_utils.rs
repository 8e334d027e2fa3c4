/// Test utilities for file-backed schedules
///
/// Each `TestSchedule` owns a fresh temporary directory holding the appointments
/// file, so tests never share state and clean up when the harness is dropped.
///
/// ```rust,ignore
/// let test_schedule = TestSchedule::new();
/// test_schedule.schedule().schedule_appointment("Ana", time)?;
/// assert_eq!(test_schedule.records().len(), 1);
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::domain::{AppointmentRecord, Schedule};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub struct TestSchedule {
        schedule: Schedule,
        data_path: PathBuf,
        _temp_dir: TempDir, // Keep temp dir alive
    }

    impl TestSchedule {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            let data_path = temp_dir.path().join("data.json");

            Self {
                schedule: Schedule::at(data_path.clone()),
                data_path,
                _temp_dir: temp_dir,
            }
        }

        pub fn schedule(&self) -> &Schedule {
            &self.schedule
        }

        pub fn data_path(&self) -> PathBuf {
            self.data_path.clone()
        }

        /// Raw records currently on disk, bypassing the schedule.
        pub fn records(&self) -> Vec<AppointmentRecord> {
            let content = fs::read_to_string(&self.data_path).expect("Failed to read data file");
            serde_json::from_str(&content).expect("Data file is not a record list")
        }

        /// Replaces the data file with arbitrary contents.
        pub fn write_raw(&self, content: &str) {
            fs::write(&self.data_path, content).expect("Failed to write data file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;
    use chrono::NaiveDate;

    #[test]
    fn harness_isolation() {
        let first = TestSchedule::new();
        let second = TestSchedule::new();
        let time = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        first.schedule().schedule_appointment("Ana", time).unwrap();

        assert_eq!(first.records().len(), 1);
        assert!(second.schedule().check_availability(time).unwrap());
        assert!(!second.data_path().exists());
    }
}
