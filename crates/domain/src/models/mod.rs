//! Domain models for the attendance backend.

pub mod attendance;
pub mod event;
pub mod organizer;
pub mod registration;
pub mod report;
pub mod support;
pub mod system_settings;
pub mod user;

pub use attendance::AttendanceRecord;
pub use event::Event;
pub use organizer::Organizer;
pub use registration::Registration;
pub use user::User;
