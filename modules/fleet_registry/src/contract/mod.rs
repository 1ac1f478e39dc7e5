//! Contract layer - public domain models and error taxonomy
//!
//! These types are transport-agnostic; persistence mapping lives in
//! `infra::storage`.

pub mod error;
pub mod model;

pub use error::{ConfigError, StoreError};
pub use model::{
    Administrator, AuditInfo, NewAdministrator, NewVehicle, Profile, UnknownProfile, Vehicle,
};
