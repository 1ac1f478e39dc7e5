//! Fleet Registry Module
//!
//! Persistence backend for vehicle and administrator records, built on
//! SeaORM. Schema evolution runs through versioned migrations and every
//! tracked change is audit-stamped before it is written.

// Public exports
pub mod contract;
pub use contract::{
    error::{ConfigError, StoreError},
    Administrator, AuditInfo, NewAdministrator, NewVehicle, Profile, Vehicle,
};

pub mod config;
pub use config::AppConfig;

pub mod domain;
pub use domain::audit::{ActorResolver, SystemActor, SYSTEM_ACTOR};

pub mod infra;
pub use infra::storage::context::FleetContext;
pub use infra::storage::migrations::Migrator;
