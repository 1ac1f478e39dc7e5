//! Domain models for the fleet registry
//!
//! Plain records; no serde derives. Audit metadata is composed into each
//! record through a shared field set rather than an inheritance hierarchy.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Audit metadata carried by every persisted record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditInfo {
    /// Creation timestamp, set once at insert and immutable afterwards
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, null until the first update
    pub updated_at: Option<DateTime<Utc>>,
    /// Actor that created the row
    pub created_by: Option<String>,
    /// Actor that last updated the row
    pub updated_by: Option<String>,
}

/// Access profile of an administrator, stored by canonical name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Full administrative access
    Adm,
    /// Restricted, non-administrative access
    Editor,
}

impl Profile {
    /// Canonical name persisted in the `Perfil` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Profile::Adm => "Adm",
            Profile::Editor => "Editor",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile name outside the closed set of known variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown profile: {0}")]
pub struct UnknownProfile(pub String);

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Adm" => Ok(Profile::Adm),
            "Editor" => Ok(Profile::Editor),
            other => Err(UnknownProfile(other.to_owned())),
        }
    }
}

/// Administrator account row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Administrator {
    pub id: i32,
    /// Unique login email
    pub email: String,
    /// Stored password digest, never the raw secret
    pub password: String,
    pub profile: Profile,
    pub audit: AuditInfo,
}

/// Draft for inserting a new administrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdministrator {
    pub email: String,
    /// Password digest; callers hash raw secrets before building a draft
    pub password: String,
    pub profile: Profile,
}

/// Vehicle row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: i32,
    /// Model name
    pub name: String,
    /// Manufacturer
    pub brand: String,
    /// Fabrication year, bounded by a database check constraint
    pub year: i32,
    pub audit: AuditInfo,
}

/// Draft for inserting a new vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub name: String,
    pub brand: String,
    pub year: i32,
}
