//! System settings domain models. A single row holds instance-wide branding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_SIDEBAR_COLOR: &str = "#2c3e50";
pub const DEFAULT_ORGANIZATION_NAME: &str = "Attendance System";

/// Instance-wide settings (single row).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SystemSettings {
    pub sidebar_color: String,
    pub sidebar_logo_url: Option<String>,
    pub organization_name: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            sidebar_color: DEFAULT_SIDEBAR_COLOR.to_string(),
            sidebar_logo_url: None,
            organization_name: DEFAULT_ORGANIZATION_NAME.to_string(),
            updated_at: Utc::now(),
        }
    }
}

/// Request to update system settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateSystemSettingsRequest {
    #[validate(custom(function = "validate_hex_color"))]
    pub sidebar_color: Option<String>,

    #[validate(url(message = "sidebar_logo_url must be a valid URL"))]
    pub sidebar_logo_url: Option<String>,

    #[validate(length(
        min = 1,
        max = 200,
        message = "organization_name must be 1-200 characters"
    ))]
    pub organization_name: Option<String>,
}

fn validate_hex_color(color: &str) -> Result<(), validator::ValidationError> {
    let bytes = color.as_bytes();
    let ok = bytes.len() == 7
        && bytes[0] == b'#'
        && bytes[1..].iter().all(|b| b.is_ascii_hexdigit());
    if ok {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("hex_color");
        err.message = Some("Color must be in #RRGGBB format".into());
        Err(err)
    }
}
