use crate::application::{
    BookingForm, BookingHours, Config, InputError, SlotInput, format_date, resolve_date,
};
use crate::domain::{format_timestamp, Appointment, BookingOutcome, Schedule};
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::fmt;

/// Result of a user command, ready to be shown as text.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Booked(Appointment),
    Conflict,
    InvalidInput(InputError),
    Appointments {
        date: NaiveDate,
        appointments: Vec<Appointment>,
    },
    NoAppointments(NaiveDate),
    Availability {
        time: NaiveDateTime,
        free: bool,
    },
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Booked(_) => write!(f, "Appointment booked successfully!"),
            Feedback::Conflict => write!(f, "Sorry, this time slot is already reserved."),
            Feedback::InvalidInput(error) => write!(f, "{}", error),
            Feedback::Appointments { date, appointments } => {
                write!(f, "Appointments on {}:", format_date(*date))?;
                for appointment in appointments {
                    write!(f, "\n{}", appointment.to_display_string())?;
                }
                Ok(())
            }
            Feedback::NoAppointments(_) => write!(f, "No appointments on this date."),
            Feedback::Availability { time, free: true } => {
                write!(f, "{} is available.", format_timestamp(*time))
            }
            Feedback::Availability { time, free: false } => {
                write!(f, "{} is already reserved.", format_timestamp(*time))
            }
        }
    }
}

/// Command handlers sitting between a front end and the schedule.
///
/// Input arrives as raw text; every handler returns a `Feedback` instead of
/// touching any display state. Errors are reserved for storage failures.
pub struct AgendaApp {
    schedule: Schedule,
    booking_hours: BookingHours,
}

impl AgendaApp {
    pub fn new(config: &Config) -> Self {
        Self::with_schedule(Schedule::at(config.data_file.clone()), config.booking_hours)
    }

    pub fn with_schedule(schedule: Schedule, booking_hours: BookingHours) -> Self {
        Self {
            schedule,
            booking_hours,
        }
    }

    pub fn book(&self, form: &BookingForm) -> Result<Feedback> {
        self.book_on(form, today())
    }

    pub fn book_on(&self, form: &BookingForm, today: NaiveDate) -> Result<Feedback> {
        let (client, scheduled_time) = match form.resolve(&self.booking_hours, today) {
            Ok(resolved) => resolved,
            Err(error) => return Ok(Feedback::InvalidInput(error)),
        };

        Ok(match self.schedule.book_if_available(client, scheduled_time)? {
            BookingOutcome::Booked(appointment) => Feedback::Booked(appointment),
            BookingOutcome::Conflict => Feedback::Conflict,
        })
    }

    pub fn check(&self, slot: &SlotInput) -> Result<Feedback> {
        self.check_on(slot, today())
    }

    pub fn check_on(&self, slot: &SlotInput, today: NaiveDate) -> Result<Feedback> {
        let time = match slot.resolve(&self.booking_hours, today) {
            Ok(time) => time,
            Err(error) => return Ok(Feedback::InvalidInput(error)),
        };

        let free = self.schedule.check_availability(time)?;
        Ok(Feedback::Availability { time, free })
    }

    pub fn list(&self, date_text: &str) -> Result<Feedback> {
        self.list_on(date_text, today())
    }

    pub fn list_on(&self, date_text: &str, today: NaiveDate) -> Result<Feedback> {
        let date = match resolve_date(date_text, today) {
            Ok(date) => date,
            Err(error) => return Ok(Feedback::InvalidInput(error)),
        };

        let appointments = self.schedule.list_appointments(date)?;
        if appointments.is_empty() {
            Ok(Feedback::NoAppointments(date))
        } else {
            Ok(Feedback::Appointments { date, appointments })
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
