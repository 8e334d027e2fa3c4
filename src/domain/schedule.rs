use crate::domain::{Appointment, AppointmentRecord};
use crate::infrastructure::{AppointmentRepository, JsonFileRepository};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// File used when a schedule is opened without an explicit location.
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Minimum spacing between two appointments on the same calendar date.
pub const CONFLICT_WINDOW_SECS: i64 = 40 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Booked(Appointment),
    Conflict,
}

/// Persisted appointment book.
///
/// Every call re-reads the whole collection from the repository and every write
/// rewrites it in full. Nothing is cached between calls.
///
/// `check_availability` followed by `schedule_appointment` is not atomic: another
/// caller can book the same slot in between. Use `book_if_available` to run the
/// check and the write under one lock. The lock only covers callers sharing this
/// handle; separate processes writing the same file are not coordinated.
pub struct Schedule {
    repository: Box<dyn AppointmentRepository>,
    booking_lock: Mutex<()>,
}

impl Schedule {
    pub fn new(repository: Box<dyn AppointmentRepository>) -> Self {
        Self {
            repository,
            booking_lock: Mutex::new(()),
        }
    }

    /// Schedule backed by a JSON file. No I/O happens until the first operation.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(JsonFileRepository::new(path.into())))
    }

    /// Returns `false` when an existing appointment on the same calendar date lies
    /// strictly less than [`CONFLICT_WINDOW_SECS`] away from `proposed_time`.
    pub fn check_availability(&self, proposed_time: NaiveDateTime) -> Result<bool> {
        let appointments = self.load_appointments()?;
        Ok(is_slot_free(&appointments, proposed_time))
    }

    /// Appends a new appointment without checking for conflicts.
    pub fn schedule_appointment(
        &self,
        client: impl Into<String>,
        proposed_time: NaiveDateTime,
    ) -> Result<Appointment> {
        let appointment = Appointment::new(client, proposed_time);

        let mut records = self.repository.load()?;
        records.push(appointment.to_record());
        self.repository.save(&records)?;

        log::info!("Booked {}", appointment);
        Ok(appointment)
    }

    /// Checks and books in one step while holding the booking lock.
    pub fn book_if_available(
        &self,
        client: impl Into<String>,
        proposed_time: NaiveDateTime,
    ) -> Result<BookingOutcome> {
        let _guard = self
            .booking_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut records = self.repository.load()?;
        let appointments = decode_all(&records)?;

        if !is_slot_free(&appointments, proposed_time) {
            log::info!("Slot {} is already taken", proposed_time);
            return Ok(BookingOutcome::Conflict);
        }

        let appointment = Appointment::new(client, proposed_time);
        records.push(appointment.to_record());
        self.repository.save(&records)?;

        log::info!("Booked {}", appointment);
        Ok(BookingOutcome::Booked(appointment))
    }

    /// Appointments on `date`, in the order they were booked.
    pub fn list_appointments(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        let appointments = self.load_appointments()?;
        Ok(appointments
            .into_iter()
            .filter(|appointment| appointment.date() == date)
            .collect())
    }

    fn load_appointments(&self) -> Result<Vec<Appointment>> {
        let records = self.repository.load()?;
        decode_all(&records)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::at(DEFAULT_DATA_FILE)
    }
}

fn decode_all(records: &[AppointmentRecord]) -> Result<Vec<Appointment>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Appointment::from_record(record)
                .with_context(|| format!("Failed to decode appointment #{}", index + 1))
        })
        .collect()
}

fn is_slot_free(appointments: &[Appointment], proposed_time: NaiveDateTime) -> bool {
    !appointments
        .iter()
        .any(|existing| conflicts(existing.scheduled_time(), proposed_time))
}

fn conflicts(existing: NaiveDateTime, proposed: NaiveDateTime) -> bool {
    existing.date() == proposed.date()
        && (existing - proposed).num_seconds().abs() < CONFLICT_WINDOW_SECS
}
