//! User entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::user::{Gender, User, UserRole};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for user_role that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRoleDb {
    User,
    Admin,
    SystemOwner,
}

impl From<UserRoleDb> for UserRole {
    fn from(db_role: UserRoleDb) -> Self {
        match db_role {
            UserRoleDb::User => UserRole::User,
            UserRoleDb::Admin => UserRole::Admin,
            UserRoleDb::SystemOwner => UserRole::SystemOwner,
        }
    }
}

impl From<UserRole> for UserRoleDb {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::User => UserRoleDb::User,
            UserRole::Admin => UserRoleDb::Admin,
            UserRole::SystemOwner => UserRoleDb::SystemOwner,
        }
    }
}

/// Database enum for gender that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "snake_case")]
pub enum GenderDb {
    Male,
    Female,
    Other,
    Unspecified,
}

impl From<GenderDb> for Gender {
    fn from(db_gender: GenderDb) -> Self {
        match db_gender {
            GenderDb::Male => Gender::Male,
            GenderDb::Female => Gender::Female,
            GenderDb::Other => Gender::Other,
            GenderDb::Unspecified => Gender::Unspecified,
        }
    }
}

impl From<Gender> for GenderDb {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => GenderDb::Male,
            Gender::Female => GenderDb::Female,
            Gender::Other => GenderDb::Other,
            Gender::Unspecified => GenderDb::Unspecified,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
    pub gender: GenderDb,
    pub role: UserRoleDb,
    pub address: Option<String>,
    pub is_deactivated: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// The password hash stays in the persistence layer.
impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            birthday: entity.birthday,
            gender: entity.gender.into(),
            role: entity.role.into(),
            address: entity.address,
            is_deactivated: entity.is_deactivated,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
