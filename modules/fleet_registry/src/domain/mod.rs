//! Domain layer - audit stamping and credential rules

pub mod audit;
pub mod password;

pub use audit::{ActorResolver, AuditFields, EntryState, SystemActor, SYSTEM_ACTOR};
