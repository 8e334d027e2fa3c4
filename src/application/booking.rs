use crate::domain::{parse_date, DATE_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};

pub const DEFAULT_FIRST_HOUR: u32 = 9;
pub const DEFAULT_LAST_HOUR: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Invalid time. Try again.")]
    InvalidTime,

    #[error("Invalid date {0:?}, expected dd/mm/yyyy.")]
    InvalidDate(String),

    #[error("Client name is required.")]
    MissingClient,
}

/// Hours of the day (inclusive) in which appointments may start.
///
/// This is a front-end policy: `Schedule` itself accepts any time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingHours {
    pub first_hour: u32,
    pub last_hour: u32,
}

impl BookingHours {
    pub fn contains(&self, hour: u32) -> bool {
        (self.first_hour..=self.last_hour).contains(&hour)
    }
}

impl Default for BookingHours {
    fn default() -> Self {
        Self {
            first_hour: DEFAULT_FIRST_HOUR,
            last_hour: DEFAULT_LAST_HOUR,
        }
    }
}

/// A requested slot as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct SlotInput {
    /// `dd/mm/yyyy`; empty means today.
    pub date: String,
    pub hour: String,
    pub minute: String,
}

impl SlotInput {
    pub fn resolve(
        &self,
        hours: &BookingHours,
        today: NaiveDate,
    ) -> Result<NaiveDateTime, InputError> {
        let hour = parse_number(&self.hour).filter(|hour| hours.contains(*hour));
        let minute = parse_number(&self.minute).filter(|minute| *minute <= 59);
        let (Some(hour), Some(minute)) = (hour, minute) else {
            return Err(InputError::InvalidTime);
        };

        let date = resolve_date(&self.date, today)?;
        date.and_hms_opt(hour, minute, 0).ok_or(InputError::InvalidTime)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub client: String,
    pub slot: SlotInput,
}

impl BookingForm {
    pub fn resolve(
        &self,
        hours: &BookingHours,
        today: NaiveDate,
    ) -> Result<(String, NaiveDateTime), InputError> {
        let client = self.client.trim();
        if client.is_empty() {
            return Err(InputError::MissingClient);
        }

        let scheduled_time = self.slot.resolve(hours, today)?;
        Ok((client.to_string(), scheduled_time))
    }
}

/// Parses a `dd/mm/yyyy` date, falling back to `today` when the text is blank.
pub fn resolve_date(text: &str, today: NaiveDate) -> Result<NaiveDate, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(today);
    }

    parse_date(text).map_err(|e| {
        log::debug!("Rejected date input: {}", e);
        InputError::InvalidDate(text.to_string())
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_number(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}
