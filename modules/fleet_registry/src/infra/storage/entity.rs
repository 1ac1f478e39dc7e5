//! SeaORM entities for database tables
//!
//! Physical table and column names keep the legacy Portuguese identifiers;
//! both tables carry the shared audit columns.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;

use crate::domain::audit::AuditFields;

/// Administrator table entity
pub mod administrator {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "Administradores")]
    pub struct Model {
        /// Surrogate key
        #[sea_orm(primary_key, column_name = "Id")]
        pub id: i32,

        /// Unique login email
        #[sea_orm(column_name = "Email", unique)]
        pub email: String,

        /// Password digest
        #[sea_orm(column_name = "Senha")]
        pub password: String,

        /// Access profile stored by canonical name
        #[sea_orm(column_name = "Perfil")]
        pub profile: String,

        /// Creation timestamp
        #[sea_orm(column_name = "DataCriacao")]
        pub created_at: DateTimeUtc,

        /// Last update timestamp, null until the first update
        #[sea_orm(column_name = "DataAtualizacao")]
        pub updated_at: Option<DateTimeUtc>,

        /// Actor that created the row
        #[sea_orm(column_name = "CriadoPor")]
        pub created_by: Option<String>,

        /// Actor that last updated the row
        #[sea_orm(column_name = "AtualizadoPor")]
        pub updated_by: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Vehicle table entity
pub mod vehicle {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "Veiculos")]
    pub struct Model {
        /// Surrogate key
        #[sea_orm(primary_key, column_name = "Id")]
        pub id: i32,

        /// Model name
        #[sea_orm(column_name = "Nome")]
        pub name: String,

        /// Manufacturer
        #[sea_orm(column_name = "Marca")]
        pub brand: String,

        /// Fabrication year, bounded server-side by a check constraint
        #[sea_orm(column_name = "Ano")]
        pub year: i32,

        /// Creation timestamp
        #[sea_orm(column_name = "DataCriacao")]
        pub created_at: DateTimeUtc,

        /// Last update timestamp, null until the first update
        #[sea_orm(column_name = "DataAtualizacao")]
        pub updated_at: Option<DateTimeUtc>,

        /// Actor that created the row
        #[sea_orm(column_name = "CriadoPor")]
        pub created_by: Option<String>,

        /// Actor that last updated the row
        #[sea_orm(column_name = "AtualizadoPor")]
        pub updated_by: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl AuditFields for administrator::ActiveModel {
    fn set_created(&mut self, at: DateTime<Utc>, by: &str) {
        self.created_at = Set(at);
        self.created_by = Set(Some(by.to_owned()));
    }

    fn set_updated(&mut self, at: DateTime<Utc>, by: &str) {
        self.updated_at = Set(Some(at));
        self.updated_by = Set(Some(by.to_owned()));
    }
}

impl AuditFields for vehicle::ActiveModel {
    fn set_created(&mut self, at: DateTime<Utc>, by: &str) {
        self.created_at = Set(at);
        self.created_by = Set(Some(by.to_owned()));
    }

    fn set_updated(&mut self, at: DateTime<Utc>, by: &str) {
        self.updated_at = Set(Some(at));
        self.updated_by = Set(Some(by.to_owned()));
    }
}
