//! Data ingestion layer for the e-commerce reporting pipeline.
//!
//! Responsible for reading and parsing the delimited input files, grouping
//! session records into the per-device and per-month aggregates, and merging
//! the monthly aggregate with the external adds-to-cart series.

pub mod aggregator;
pub mod merger;
pub mod reader;

pub use report_core as core;
