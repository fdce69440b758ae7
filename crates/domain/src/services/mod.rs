//! Domain services containing business logic.

pub mod recurrence;
