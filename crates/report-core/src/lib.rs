//! Core domain layer for the e-commerce reporting pipeline.
//!
//! Defines the data model (session records, monthly metric rows, report
//! labels), the error type, calendar-date handling, the month-over-month
//! temporal transforms, and the settings layer shared by the other crates.

pub mod dates;
pub mod error;
pub mod models;
pub mod settings;
pub mod transforms;
