mod appointment_test;
mod availability_test;
mod error_test;
mod process_test;
