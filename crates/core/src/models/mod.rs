pub mod appointment;
pub mod availability;
pub mod city;
pub mod process;
pub mod time_slot;
pub mod unit;
