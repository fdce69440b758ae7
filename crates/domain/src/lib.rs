//! Domain layer for the attendance backend.
//!
//! This crate contains:
//! - Domain models (User, Event, Registration, AttendanceRecord)
//! - Role and status enums with their capability rules
//! - Business logic services (recurrence expansion)

pub mod models;
pub mod services;
