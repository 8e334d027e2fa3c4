use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

const TWO_DIGITS: RangeInclusive<usize> = 1..=2;
const FOUR_DIGITS: RangeInclusive<usize> = 4..=4;

/// Text layout of a persisted timestamp: `dd/mm/yyyy HH:MM`, 24-hour clock.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Text layout of a calendar date as typed by users: `dd/mm/yyyy`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("{0:?} does not follow the dd/mm/yyyy HH:MM layout")]
    WrongShape(String),

    #[error("{text:?} has a non-numeric {field}")]
    NotNumeric { text: String, field: &'static str },

    #[error("{0:?} names a date or time that does not exist")]
    Impossible(String),
}

/// Serialized form of an appointment, exactly as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub client: String,
    pub scheduled_time: String,
}

/// One client booking. Never mutated once built; a changed booking is a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    client: String,
    scheduled_time: NaiveDateTime,
}

impl Appointment {
    /// Seconds and sub-seconds are dropped; appointments have minute resolution.
    pub fn new(client: impl Into<String>, scheduled_time: NaiveDateTime) -> Self {
        let scheduled_time = scheduled_time
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(scheduled_time);

        Self {
            client: client.into(),
            scheduled_time,
        }
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn scheduled_time(&self) -> NaiveDateTime {
        self.scheduled_time
    }

    pub fn date(&self) -> NaiveDate {
        self.scheduled_time.date()
    }

    pub fn to_record(&self) -> AppointmentRecord {
        AppointmentRecord {
            client: self.client.clone(),
            scheduled_time: format_timestamp(self.scheduled_time),
        }
    }

    pub fn from_record(record: &AppointmentRecord) -> Result<Self, FormatError> {
        let scheduled_time = parse_timestamp(&record.scheduled_time)?;
        Ok(Self::new(record.client.clone(), scheduled_time))
    }

    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.client, format_timestamp(self.scheduled_time))
    }
}

pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Strict parser for `dd/mm/yyyy HH:MM`. No seconds, no surrounding whitespace.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, FormatError> {
    let (date_part, time_part) = text
        .split_once(' ')
        .ok_or_else(|| FormatError::WrongShape(text.to_string()))?;

    let date = date_from_fields(text, date_part)?;

    let time_fields: Vec<&str> = time_part.split(':').collect();
    let [hour, minute] = time_fields.as_slice() else {
        return Err(FormatError::WrongShape(text.to_string()));
    };
    let hour = numeric_field(text, hour, "hour", TWO_DIGITS)?;
    let minute = numeric_field(text, minute, "minute", TWO_DIGITS)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| FormatError::Impossible(text.to_string()))?;

    Ok(NaiveDateTime::new(date, time))
}

/// Strict parser for a `dd/mm/yyyy` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, FormatError> {
    date_from_fields(text, text)
}

fn date_from_fields(text: &str, date_part: &str) -> Result<NaiveDate, FormatError> {
    let fields: Vec<&str> = date_part.split('/').collect();
    let [day, month, year] = fields.as_slice() else {
        return Err(FormatError::WrongShape(text.to_string()));
    };

    let day = numeric_field(text, day, "day", TWO_DIGITS)?;
    let month = numeric_field(text, month, "month", TWO_DIGITS)?;
    let year = numeric_field(text, year, "year", FOUR_DIGITS)?;

    let impossible = || FormatError::Impossible(text.to_string());
    let year = i32::try_from(year).map_err(|_| impossible())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(impossible)
}

/// Digits only, with a width in `digits`. Day, month, hour and minute take one or
/// two digits; the year takes exactly four.
fn numeric_field(
    text: &str,
    value: &str,
    field: &'static str,
    digits: RangeInclusive<usize>,
) -> Result<u32, FormatError> {
    let not_numeric = || FormatError::NotNumeric {
        text: text.to_string(),
        field,
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_numeric());
    }

    if !digits.contains(&value.len()) {
        return Err(FormatError::WrongShape(text.to_string()));
    }

    value.parse().map_err(|_| not_numeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn record_uses_zero_padded_day_first_layout() {
        let appointment = Appointment::new("Ana", at(2024, 3, 5, 9, 7));
        let record = appointment.to_record();

        assert_eq!(record.client, "Ana");
        assert_eq!(record.scheduled_time, "05/03/2024 09:07");
    }

    #[test]
    fn record_round_trips_to_the_same_appointment() {
        let appointment = Appointment::new("Bea Souza", at(1999, 12, 31, 23, 59));
        let decoded = Appointment::from_record(&appointment.to_record()).unwrap();

        assert_eq!(decoded, appointment);
        assert_eq!(decoded.client(), "Bea Souza");
    }

    #[test]
    fn seconds_are_dropped_on_construction() {
        let time = at(2024, 1, 1, 10, 0) + chrono::Duration::seconds(42);
        let appointment = Appointment::new("Ana", time);

        assert_eq!(appointment.scheduled_time(), at(2024, 1, 1, 10, 0));
    }

    #[test]
    fn display_string_shows_client_and_timestamp() {
        let appointment = Appointment::new("Ana", at(2024, 3, 5, 10, 0));
        assert_eq!(appointment.to_display_string(), "Ana: 05/03/2024 10:00");
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        for text in ["05/03/2024", "05/03/2024 10:00:00", "05/03 10:00", "05-03-2024 10:00", ""] {
            assert!(
                matches!(parse_timestamp(text), Err(FormatError::WrongShape(_))),
                "{text:?} should be rejected as malformed"
            );
        }
    }

    #[test]
    fn field_widths_are_enforced() {
        for text in [
            "05/03/24 10:00",
            "05/03/02024 10:00",
            "005/03/2024 10:00",
            "05/003/2024 10:00",
            "05/03/2024 010:00",
            "05/03/2024 10:000",
            "5/3/24 9:7",
        ] {
            assert!(
                matches!(parse_timestamp(text), Err(FormatError::WrongShape(_))),
                "{text:?} should be rejected for its field widths"
            );
        }
        assert!(matches!(parse_date("05/03/24"), Err(FormatError::WrongShape(_))));
    }

    #[test]
    fn single_digit_day_month_and_time_are_accepted() {
        let record = AppointmentRecord {
            client: "Ana".to_string(),
            scheduled_time: "5/3/2024 9:7".to_string(),
        };
        let appointment = Appointment::from_record(&record).unwrap();

        assert_eq!(appointment.scheduled_time(), at(2024, 3, 5, 9, 7));
        assert_eq!(appointment.to_record().scheduled_time, "05/03/2024 09:07");
    }

    #[test]
    fn non_numeric_component_is_rejected() {
        let err = parse_timestamp("05/03/2024 1O:00").unwrap_err();
        assert_eq!(
            err,
            FormatError::NotNumeric {
                text: "05/03/2024 1O:00".to_string(),
                field: "hour",
            }
        );
        assert!(parse_timestamp("05/03/+2024 10:00").is_err());
    }

    #[test]
    fn impossible_date_or_time_is_rejected() {
        assert!(matches!(
            parse_timestamp("30/02/2024 10:00"),
            Err(FormatError::Impossible(_))
        ));
        assert!(matches!(
            parse_timestamp("05/03/2024 24:00"),
            Err(FormatError::Impossible(_))
        ));
        assert!(matches!(
            parse_timestamp("05/03/2024 10:60"),
            Err(FormatError::Impossible(_))
        ));
    }

    #[test]
    fn date_parser_accepts_only_day_month_year() {
        assert_eq!(
            parse_date("05/03/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert!(matches!(parse_date("2024-03-05"), Err(FormatError::WrongShape(_))));
        assert!(matches!(parse_date("31/04/2024"), Err(FormatError::Impossible(_))));
        assert!(matches!(parse_date("05/03/2024 "), Err(FormatError::NotNumeric { .. })));
    }

    #[test]
    fn bad_record_fails_to_decode() {
        let record = AppointmentRecord {
            client: "Ana".to_string(),
            scheduled_time: "tomorrow at ten".to_string(),
        };
        assert!(Appointment::from_record(&record).is_err());
    }
}
