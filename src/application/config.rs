use crate::application::BookingHours;
use crate::domain::DEFAULT_DATA_FILE;
use std::path::PathBuf;

pub struct Config {
    pub data_file: PathBuf,
    pub booking_hours: BookingHours,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = lookup("AGENDA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                let agenda_dir = lookup("AGENDA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| {
                        dirs::data_local_dir()
                            .unwrap_or_else(|| PathBuf::from("."))
                            .join("agenda")
                    });
                agenda_dir.join(DEFAULT_DATA_FILE)
            });

        let defaults = BookingHours::default();
        let hour = |key: &str, default: u32| {
            lookup(key)
                .and_then(|value| value.trim().parse::<u32>().ok())
                .filter(|hour| *hour < 24)
                .unwrap_or(default)
        };
        let mut booking_hours = BookingHours {
            first_hour: hour("AGENDA_FIRST_HOUR", defaults.first_hour),
            last_hour: hour("AGENDA_LAST_HOUR", defaults.last_hour),
        };
        if booking_hours.first_hour > booking_hours.last_hour {
            log::warn!(
                "Booking hours {}..{} are inverted, using defaults",
                booking_hours.first_hour,
                booking_hours.last_hour
            );
            booking_hours = defaults;
        }

        Self {
            data_file,
            booking_hours,
        }
    }
}
