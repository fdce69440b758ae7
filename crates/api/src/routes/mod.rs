//! HTTP route handlers.

pub mod admin_reports;
pub mod auth;
pub mod events;
pub mod health;
pub mod organizers;
pub mod registrations;
pub mod support;
pub mod system_settings;
pub mod users;
