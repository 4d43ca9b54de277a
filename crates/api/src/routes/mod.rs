pub mod appointment;
pub mod availability;
pub mod health;
pub mod process;
