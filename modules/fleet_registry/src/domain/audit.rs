//! Audit stamping applied to tracked changes before they are persisted
//!
//! The persistence context runs [`stamp`] over every queued change right
//! before building statements, so stamped values commit in the same
//! transaction as the rest of the change set.

use chrono::{DateTime, Utc};

/// Placeholder actor recorded when no caller identity is wired in.
pub const SYSTEM_ACTOR: &str = "Sistema";

/// Change-tracking state of a pending entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Queued for insert
    Added,
    /// Queued for update
    Modified,
    /// Queued for delete
    Deleted,
}

/// Write access to the audit columns of a tracked record.
///
/// Any active model carrying the shared audit field set implements this;
/// the stamping pass is polymorphic over the capability, not over entity
/// types.
pub trait AuditFields {
    /// Records creation metadata.
    fn set_created(&mut self, at: DateTime<Utc>, by: &str);

    /// Records update metadata; creation metadata is left alone.
    fn set_updated(&mut self, at: DateTime<Utc>, by: &str);
}

/// Resolves the actor attributed to the current unit of work.
///
/// Resolved once per save call. Deployments with a request identity
/// source plug it in here instead of patching the stamping pass.
pub trait ActorResolver: Send + Sync {
    fn current_actor(&self) -> String;
}

/// Default resolver returning the [`SYSTEM_ACTOR`] placeholder
pub struct SystemActor;

impl ActorResolver for SystemActor {
    fn current_actor(&self) -> String {
        SYSTEM_ACTOR.to_owned()
    }
}

/// Stamps audit metadata on a single tracked entry.
///
/// Newly added entries receive creation metadata, modified entries receive
/// update metadata. Deleted entries, and entries without audit fields, are
/// left untouched.
pub fn stamp(
    state: EntryState,
    fields: Option<&mut dyn AuditFields>,
    now: DateTime<Utc>,
    actor: &str,
) {
    let Some(fields) = fields else {
        return;
    };
    match state {
        EntryState::Added => fields.set_created(now, actor),
        EntryState::Modified => fields.set_updated(now, actor),
        EntryState::Deleted => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        created: Option<(DateTime<Utc>, String)>,
        updated: Option<(DateTime<Utc>, String)>,
    }

    impl AuditFields for Recording {
        fn set_created(&mut self, at: DateTime<Utc>, by: &str) {
            self.created = Some((at, by.to_owned()));
        }

        fn set_updated(&mut self, at: DateTime<Utc>, by: &str) {
            self.updated = Some((at, by.to_owned()));
        }
    }

    #[test]
    fn added_entries_receive_creation_metadata_only() {
        let mut fields = Recording::default();
        let now = Utc::now();

        stamp(EntryState::Added, Some(&mut fields), now, SYSTEM_ACTOR);

        assert_eq!(fields.created, Some((now, SYSTEM_ACTOR.to_owned())));
        assert!(fields.updated.is_none());
    }

    #[test]
    fn modified_entries_receive_update_metadata_only() {
        let mut fields = Recording::default();
        let now = Utc::now();

        stamp(EntryState::Modified, Some(&mut fields), now, "operator");

        assert!(fields.created.is_none());
        assert_eq!(fields.updated, Some((now, "operator".to_owned())));
    }

    #[test]
    fn deleted_entries_are_untouched() {
        let mut fields = Recording::default();

        stamp(EntryState::Deleted, Some(&mut fields), Utc::now(), SYSTEM_ACTOR);

        assert!(fields.created.is_none());
        assert!(fields.updated.is_none());
    }

    #[test]
    fn entries_without_audit_fields_are_a_no_op() {
        // Nothing to assert beyond "does not panic": the guard swallows
        // the missing capability.
        stamp(EntryState::Added, None, Utc::now(), SYSTEM_ACTOR);
        stamp(EntryState::Modified, None, Utc::now(), SYSTEM_ACTOR);
    }

    #[test]
    fn system_actor_resolves_to_the_placeholder() {
        assert_eq!(SystemActor.current_actor(), SYSTEM_ACTOR);
    }
}
