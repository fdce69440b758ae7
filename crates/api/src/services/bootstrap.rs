//! System-owner bootstrap service for initial setup.
//!
//! Creates the first system-owner account on startup if configured via
//! environment variables. This is a one-time operation that checks whether a
//! system owner already exists.

use sqlx::PgPool;
use tracing::{info, warn};

use persistence::entities::UserRoleDb;
use persistence::repositories::UserRepository;
use shared::password::{hash_password, PasswordError};
use shared::validation::normalize_email;

use crate::config::BootstrapConfig;

/// Error types for system-owner bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// Bootstrap the system-owner account if configured and not already done.
///
/// This function should be called after migrations on startup.
/// It is idempotent - if a system owner already exists, it does nothing.
pub async fn bootstrap_system_owner(
    pool: &PgPool,
    config: &BootstrapConfig,
) -> Result<(), BootstrapError> {
    // Skip if not configured
    if config.system_owner_email.is_empty() {
        return Ok(());
    }

    if config.system_owner_password.is_empty() {
        warn!(
            "ATT__BOOTSTRAP__SYSTEM_OWNER_EMAIL is set but ATT__BOOTSTRAP__SYSTEM_OWNER_PASSWORD is empty - skipping bootstrap"
        );
        return Ok(());
    }

    let users = UserRepository::new(pool.clone());

    if users.role_exists(UserRoleDb::SystemOwner).await? {
        info!("System owner already exists - skipping bootstrap");
        return Ok(());
    }

    let email = normalize_email(&config.system_owner_email);
    if users.find_by_email(&email).await?.is_some() {
        info!("Bootstrap email already registered - skipping bootstrap");
        return Ok(());
    }

    let password_hash = hash_password(&config.system_owner_password)?;

    let user = users
        .create_user(
            &email,
            &password_hash,
            &config.system_owner_first_name,
            &config.system_owner_last_name,
            None,
            persistence::entities::GenderDb::Unspecified,
            UserRoleDb::SystemOwner,
            None,
        )
        .await?;

    info!(
        email = %email,
        user_id = %user.id,
        "Bootstrap system owner created successfully"
    );

    warn!(
        "SECURITY: Remove ATT__BOOTSTRAP__SYSTEM_OWNER_EMAIL and \
         ATT__BOOTSTRAP__SYSTEM_OWNER_PASSWORD from configuration after initial setup"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    // Note: bootstrap requires a database connection and is covered by integration tests
}
