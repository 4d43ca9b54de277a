pub mod appointment;
pub mod process;
pub mod unit;
