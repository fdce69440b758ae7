//! Database entities (row mappings).

pub mod attendance;
pub mod event;
pub mod organizer;
pub mod registration;
pub mod report;
pub mod support_ticket;
pub mod system_settings;
pub mod user;

pub use attendance::{AttendanceRecordEntity, AttendedEventEntity};
pub use event::{EventEntity, EventStatusDb, RecurrencePatternDb};
pub use organizer::{OrganizerEntity, OrganizerMembershipEntity, OrganizerWithCountEntity};
pub use registration::{RegistrationEntity, RegistrationStatusDb, RegistrationWithEventEntity};
pub use report::{AttendanceDetailEntity, EventReportEntity, MonthlySummaryEntity};
pub use support_ticket::SupportTicketEntity;
pub use system_settings::SystemSettingsEntity;
pub use user::{GenderDb, UserEntity, UserRoleDb};
