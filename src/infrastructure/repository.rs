use crate::domain::AppointmentRecord;
use anyhow::Result;

/// Whole-collection persistence for appointment records.
pub trait AppointmentRepository: Send + Sync {
    /// Reads every stored record in insertion order.
    fn load(&self) -> Result<Vec<AppointmentRecord>>;

    /// Replaces the stored collection with `records`.
    fn save(&self, records: &[AppointmentRecord]) -> Result<()>;
}
