//! Unit-of-work persistence context over the fleet schema

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, DatabaseConfig};
use crate::contract::error::StoreError;
use crate::contract::model::{Administrator, NewAdministrator, NewVehicle, Vehicle};
use crate::domain::audit::{self, ActorResolver, AuditFields, EntryState, SystemActor};

use super::migrations::Migrator;
use super::{db, entity, mapper, retry};

/// A pending change queued on the context until the next save
#[async_trait::async_trait]
trait TrackedEntry: Send + Sync {
    fn state(&self) -> EntryState;

    fn audit_fields(&mut self) -> Option<&mut dyn AuditFields>;

    async fn apply(&self, tx: &DatabaseTransaction) -> Result<(), DbErr>;
}

struct Entry<A> {
    state: EntryState,
    model: A,
}

#[async_trait::async_trait]
impl<A> TrackedEntry for Entry<A>
where
    A: ActiveModelTrait + ActiveModelBehavior + AuditFields + Clone + Send + Sync + 'static,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    fn state(&self) -> EntryState {
        self.state
    }

    fn audit_fields(&mut self) -> Option<&mut dyn AuditFields> {
        Some(&mut self.model)
    }

    async fn apply(&self, tx: &DatabaseTransaction) -> Result<(), DbErr> {
        let model = self.model.clone();
        match self.state {
            EntryState::Added => {
                model.insert(tx).await?;
            }
            EntryState::Modified => {
                model.update(tx).await?;
            }
            EntryState::Deleted => {
                model.delete(tx).await?;
            }
        }
        Ok(())
    }
}

/// Scoped unit of work over the fleet schema.
///
/// One context serves one logical unit of work; it is not meant to be
/// shared across callers. Mutations queue tracked changes, and
/// [`save`](Self::save) applies the whole queue in a single transaction,
/// audit-stamping every entry first. Read queries return detached models
/// that never feed back into the change set.
pub struct FleetContext {
    conn: DatabaseConnection,
    policy: DatabaseConfig,
    actor: Arc<dyn ActorResolver>,
    cancel: CancellationToken,
    pending: Vec<Box<dyn TrackedEntry>>,
}

impl std::fmt::Debug for FleetContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleetContext")
            .field("policy", &self.policy)
            .field("cancel", &self.cancel)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl FleetContext {
    /// Connects using application configuration.
    ///
    /// Fails immediately with a configuration error when the connection
    /// string is missing; no partially usable context is returned.
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        Self::connect_with(config, Arc::new(SystemActor), CancellationToken::new()).await
    }

    /// Connects with an explicit actor resolver and cancellation token.
    pub async fn connect_with(
        config: &AppConfig,
        actor: Arc<dyn ActorResolver>,
        cancel: CancellationToken,
    ) -> Result<Self, StoreError> {
        let conn = db::connect(config, &cancel).await?;
        Ok(Self {
            conn,
            policy: config.database.clone(),
            actor,
            cancel,
            pending: Vec::new(),
        })
    }

    /// Applies pending schema migrations on this connection.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        Migrator::up(&self.conn, None).await?;
        tracing::info!("schema migrations applied");
        Ok(())
    }

    /// The underlying connection pool.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    // ===== Change tracking =====

    /// Queues an administrator insert.
    pub fn add_administrator(&mut self, draft: NewAdministrator) {
        self.track(EntryState::Added, mapper::new_administrator(&draft));
    }

    /// Queues an administrator update.
    pub fn update_administrator(&mut self, admin: &Administrator) {
        self.track(EntryState::Modified, mapper::updated_administrator(admin));
    }

    /// Queues an administrator delete.
    pub fn remove_administrator(&mut self, id: i32) {
        self.track(EntryState::Deleted, mapper::deleted_administrator(id));
    }

    /// Queues a vehicle insert.
    pub fn add_vehicle(&mut self, draft: NewVehicle) {
        self.track(EntryState::Added, mapper::new_vehicle(&draft));
    }

    /// Queues a vehicle update.
    pub fn update_vehicle(&mut self, vehicle: &Vehicle) {
        self.track(EntryState::Modified, mapper::updated_vehicle(vehicle));
    }

    /// Queues a vehicle delete.
    pub fn remove_vehicle(&mut self, id: i32) {
        self.track(EntryState::Deleted, mapper::deleted_vehicle(id));
    }

    /// Number of queued changes awaiting the next save.
    pub fn pending_changes(&self) -> usize {
        self.pending.len()
    }

    /// Drops every queued change without touching the database.
    pub fn discard_changes(&mut self) {
        self.pending.clear();
    }

    fn track<A>(&mut self, state: EntryState, model: A)
    where
        A: ActiveModelTrait + ActiveModelBehavior + AuditFields + Clone + Send + Sync + 'static,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        self.pending.push(Box::new(Entry { state, model }));
    }

    /// Applies every queued change in one transaction.
    ///
    /// The audit stamping pass runs exactly once per call, before any
    /// statement is built, so stamped values commit atomically with the
    /// rest of the change set. On failure the queue is kept so the caller
    /// can retry or [`discard_changes`](Self::discard_changes); it is
    /// cleared only after a successful commit. Returns the number of
    /// applied changes.
    pub async fn save(&mut self) -> Result<usize, StoreError> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let actor = self.actor.current_actor();
        for entry in &mut self.pending {
            let state = entry.state();
            audit::stamp(state, entry.audit_fields(), now, &actor);
        }

        let conn = &self.conn;
        let pending = &self.pending;
        let applied = retry::with_retry(&self.policy, &self.cancel, || {
            let conn = conn;
            let pending = pending;
            async move {
                let tx = conn.begin().await?;
                for entry in pending.iter() {
                    entry.apply(&tx).await?;
                }
                tx.commit().await?;
                Ok(pending.len())
            }
        })
        .await?;

        self.pending.clear();
        tracing::debug!(changes = applied, "change set committed");
        Ok(applied)
    }

    // ===== Read-only queries =====
    //
    // Results are detached domain models; mutating them has no effect on
    // a later save.

    /// All administrators, ordered by id.
    pub async fn administrators(&self) -> Result<Vec<Administrator>, StoreError> {
        let conn = &self.conn;
        let rows = self
            .run(|| {
                let conn = conn;
                async move {
                    entity::administrator::Entity::find()
                        .order_by_asc(entity::administrator::Column::Id)
                        .all(conn)
                        .await
                }
            })
            .await?;
        rows.into_iter().map(Administrator::try_from).collect()
    }

    /// Looks an administrator up by its unique email.
    pub async fn find_administrator_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Administrator>, StoreError> {
        let conn = &self.conn;
        let row = self
            .run(|| {
                let conn = conn;
                async move {
                    entity::administrator::Entity::find()
                        .filter(entity::administrator::Column::Email.eq(email))
                        .one(conn)
                        .await
                }
            })
            .await?;
        row.map(Administrator::try_from).transpose()
    }

    /// All vehicles, ordered by id.
    pub async fn vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        let conn = &self.conn;
        let rows = self
            .run(|| {
                let conn = conn;
                async move {
                    entity::vehicle::Entity::find()
                        .order_by_asc(entity::vehicle::Column::Id)
                        .all(conn)
                        .await
                }
            })
            .await?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    /// Looks a vehicle up by id.
    pub async fn find_vehicle(&self, id: i32) -> Result<Option<Vehicle>, StoreError> {
        let conn = &self.conn;
        let row = self
            .run(|| {
                let conn = conn;
                async move { entity::vehicle::Entity::find_by_id(id).one(conn).await }
            })
            .await?;
        Ok(row.map(Vehicle::from))
    }

    /// Vehicles whose brand contains the given fragment, ordered by name.
    ///
    /// Matching is case-insensitive under the usual backend collations.
    pub async fn vehicles_by_brand(&self, brand: &str) -> Result<Vec<Vehicle>, StoreError> {
        let conn = &self.conn;
        let rows = self
            .run(|| {
                let conn = conn;
                async move {
                    entity::vehicle::Entity::find()
                        .filter(entity::vehicle::Column::Brand.contains(brand))
                        .order_by_asc(entity::vehicle::Column::Name)
                        .all(conn)
                        .await
                }
            })
            .await?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    /// Vehicles of a fabrication year, ordered by brand then name.
    pub async fn vehicles_by_year(&self, year: i32) -> Result<Vec<Vehicle>, StoreError> {
        let conn = &self.conn;
        let rows = self
            .run(|| {
                let conn = conn;
                async move {
                    entity::vehicle::Entity::find()
                        .filter(entity::vehicle::Column::Year.eq(year))
                        .order_by_asc(entity::vehicle::Column::Brand)
                        .order_by_asc(entity::vehicle::Column::Name)
                        .all(conn)
                        .await
                }
            })
            .await?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn run<T, F, Fut>(&self, operation: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DbErr>>,
    {
        retry::with_retry(&self.policy, &self.cancel, operation).await
    }
}
