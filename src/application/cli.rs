use crate::application::{AgendaApp, BookingForm, Config, SlotInput};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Book client appointments and list them by day")]
#[command(version)]
pub struct Cli {
    /// Appointments file (overrides AGENDA_FILE / AGENDA_DIR)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Book an appointment if the slot is free
    Book {
        /// Client name
        #[arg(short, long)]
        client: String,
        /// Date (dd/mm/yyyy format, defaults to today)
        #[arg(short, long, default_value = "")]
        date: String,
        /// Hour of the appointment
        #[arg(long)]
        hour: String,
        /// Minute of the appointment
        #[arg(long)]
        minute: String,
    },
    /// List appointments for a day
    List {
        /// Date (dd/mm/yyyy format, defaults to today)
        #[arg(short, long, default_value = "")]
        date: String,
    },
    /// Check whether a slot is still free
    Check {
        /// Date (dd/mm/yyyy format, defaults to today)
        #[arg(short, long, default_value = "")]
        date: String,
        /// Hour of the appointment
        #[arg(long)]
        hour: String,
        /// Minute of the appointment
        #[arg(long)]
        minute: String,
    },
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();

        let mut config = Config::from_env();
        if let Some(file) = cli.file {
            config.data_file = file;
        }
        log::debug!("Using appointments file {:?}", config.data_file);

        let app = AgendaApp::new(&config);

        let feedback = match cli.command {
            Some(Commands::Book {
                client,
                date,
                hour,
                minute,
            }) => app.book(&BookingForm {
                client,
                slot: SlotInput { date, hour, minute },
            })?,
            Some(Commands::List { date }) => app.list(&date)?,
            Some(Commands::Check { date, hour, minute }) => {
                app.check(&SlotInput { date, hour, minute })?
            }
            // Default: today's appointments
            None => app.list("")?,
        };

        println!("{}", feedback);
        Ok(())
    }
}
