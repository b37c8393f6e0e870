//! FieldTrack: multi-site time clock and payroll aggregation engine.
//!
//! This crate tracks field-worker attendance as append-only shift ledgers
//! split into per-site segments, and aggregates the closed segments into
//! hours and gross pay over inclusive calendar-date ranges.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod reporting;
pub mod store;
pub mod tracking;
