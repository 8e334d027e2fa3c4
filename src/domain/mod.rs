pub mod appointment;
pub mod schedule;

pub use appointment::*;
pub use schedule::*;
