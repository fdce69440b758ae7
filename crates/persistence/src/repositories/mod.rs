//! Repository implementations for database operations.

pub mod attendance;
pub mod event;
pub mod organizer;
pub mod registration;
pub mod report;
pub mod support;
pub mod system_settings;
pub mod user;

pub use attendance::AttendanceRepository;
pub use event::{EventRepository, NewEvent};
pub use organizer::OrganizerRepository;
pub use registration::RegistrationRepository;
pub use report::ReportRepository;
pub use support::SupportRepository;
pub use system_settings::SystemSettingsRepository;
pub use user::UserRepository;
