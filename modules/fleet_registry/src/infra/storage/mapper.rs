//! Conversions between SeaORM entities and domain models
//!
//! Row-to-model conversions validate stored values at the boundary; the
//! active-model builders leave columns the tracked state must not touch
//! as `NotSet` (creation metadata is never rewritten by an update).

use sea_orm::ActiveValue::Set;

use crate::contract::error::StoreError;
use crate::contract::model::{
    Administrator, AuditInfo, NewAdministrator, NewVehicle, Profile, Vehicle,
};

use super::entity;

// ===== Administrator conversions =====

impl TryFrom<entity::administrator::Model> for Administrator {
    type Error = StoreError;

    fn try_from(row: entity::administrator::Model) -> Result<Self, Self::Error> {
        let profile = row
            .profile
            .parse::<Profile>()
            .map_err(|e| StoreError::InvalidRow(e.to_string()))?;

        Ok(Self {
            id: row.id,
            email: row.email,
            password: row.password,
            profile,
            audit: AuditInfo {
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                updated_by: row.updated_by,
            },
        })
    }
}

/// Active model for inserting a draft; audit columns stay unset for the
/// stamping pass.
pub fn new_administrator(draft: &NewAdministrator) -> entity::administrator::ActiveModel {
    entity::administrator::ActiveModel {
        email: Set(draft.email.clone()),
        password: Set(draft.password.clone()),
        profile: Set(draft.profile.as_str().to_owned()),
        ..Default::default()
    }
}

/// Active model for updating an existing row.
pub fn updated_administrator(model: &Administrator) -> entity::administrator::ActiveModel {
    entity::administrator::ActiveModel {
        id: Set(model.id),
        email: Set(model.email.clone()),
        password: Set(model.password.clone()),
        profile: Set(model.profile.as_str().to_owned()),
        ..Default::default()
    }
}

/// Active model keyed for deletion.
pub fn deleted_administrator(id: i32) -> entity::administrator::ActiveModel {
    entity::administrator::ActiveModel {
        id: Set(id),
        ..Default::default()
    }
}

// ===== Vehicle conversions =====

impl From<entity::vehicle::Model> for Vehicle {
    fn from(row: entity::vehicle::Model) -> Self {
        Self {
            id: row.id,
            name: row.name,
            brand: row.brand,
            year: row.year,
            audit: AuditInfo {
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                updated_by: row.updated_by,
            },
        }
    }
}

/// Active model for inserting a draft; audit columns stay unset for the
/// stamping pass.
pub fn new_vehicle(draft: &NewVehicle) -> entity::vehicle::ActiveModel {
    entity::vehicle::ActiveModel {
        name: Set(draft.name.clone()),
        brand: Set(draft.brand.clone()),
        year: Set(draft.year),
        ..Default::default()
    }
}

/// Active model for updating an existing row.
pub fn updated_vehicle(model: &Vehicle) -> entity::vehicle::ActiveModel {
    entity::vehicle::ActiveModel {
        id: Set(model.id),
        name: Set(model.name.clone()),
        brand: Set(model.brand.clone()),
        year: Set(model.year),
        ..Default::default()
    }
}

/// Active model keyed for deletion.
pub fn deleted_vehicle(id: i32) -> entity::vehicle::ActiveModel {
    entity::vehicle::ActiveModel {
        id: Set(id),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::ActiveValue::{NotSet, Set};

    use super::*;

    fn administrator_row(profile: &str) -> entity::administrator::Model {
        entity::administrator::Model {
            id: 7,
            email: "a@b.com".to_owned(),
            password: "digest".to_owned(),
            profile: profile.to_owned(),
            created_at: Utc::now(),
            updated_at: None,
            created_by: Some("Sistema".to_owned()),
            updated_by: None,
        }
    }

    #[test]
    fn known_profile_names_map_onto_the_enum() {
        let admin = Administrator::try_from(administrator_row("Editor")).unwrap();
        assert_eq!(admin.profile, Profile::Editor);
        assert_eq!(admin.audit.created_by.as_deref(), Some("Sistema"));
    }

    #[test]
    fn unknown_profile_names_are_rejected_at_the_boundary() {
        let err = Administrator::try_from(administrator_row("Root")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRow(_)));
    }

    #[test]
    fn update_builders_never_touch_creation_columns() {
        let admin = Administrator::try_from(administrator_row("Adm")).unwrap();
        let active = updated_administrator(&admin);
        assert_eq!(active.id, Set(7));
        assert_eq!(active.created_at, NotSet);
        assert_eq!(active.created_by, NotSet);
        assert_eq!(active.updated_at, NotSet);
    }

    #[test]
    fn insert_builders_leave_audit_columns_for_the_stamping_pass() {
        let active = new_vehicle(&NewVehicle {
            name: "Onix".to_owned(),
            brand: "Chevrolet".to_owned(),
            year: 2020,
        });
        assert_eq!(active.id, NotSet);
        assert_eq!(active.created_at, NotSet);
        assert_eq!(active.created_by, NotSet);
    }
}
