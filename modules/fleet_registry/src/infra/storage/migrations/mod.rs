//! Database migrations for the fleet registry

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250909_000001_create_fleet_tables::Migration)]
    }
}

mod m20250909_000001_create_fleet_tables {
    use sea_orm::DbBackend;

    use crate::domain::audit::SYSTEM_ACTOR;
    use crate::domain::password;

    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Administradores::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Administradores::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Administradores::Email)
                                .string_len(255)
                                .not_null()
                                .comment("Email único do administrador"),
                        )
                        .col(
                            ColumnDef::new(Administradores::Senha)
                                .string_len(255)
                                .not_null()
                                .comment("Digest da senha do administrador"),
                        )
                        .col(
                            ColumnDef::new(Administradores::Perfil)
                                .string_len(10)
                                .not_null()
                                .comment("Perfil de acesso do administrador"),
                        )
                        .col(
                            ColumnDef::new(Administradores::DataCriacao)
                                .date_time()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Administradores::DataAtualizacao).date_time())
                        .col(ColumnDef::new(Administradores::CriadoPor).string_len(100))
                        .col(ColumnDef::new(Administradores::AtualizadoPor).string_len(100))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("IX_Administradores_Email")
                        .table(Administradores::Table)
                        .col(Administradores::Email)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Veiculos::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Veiculos::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Veiculos::Nome)
                                .string_len(150)
                                .not_null()
                                .comment("Nome/modelo do veículo"),
                        )
                        .col(
                            ColumnDef::new(Veiculos::Marca)
                                .string_len(100)
                                .not_null()
                                .comment("Marca/fabricante do veículo"),
                        )
                        .col(
                            ColumnDef::new(Veiculos::Ano)
                                .integer()
                                .not_null()
                                .comment("Ano de fabricação do veículo")
                                .check(year_bounds(manager.get_database_backend())),
                        )
                        .col(
                            ColumnDef::new(Veiculos::DataCriacao)
                                .date_time()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Veiculos::DataAtualizacao).date_time())
                        .col(ColumnDef::new(Veiculos::CriadoPor).string_len(100))
                        .col(ColumnDef::new(Veiculos::AtualizadoPor).string_len(100))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("IX_Veiculos_Marca")
                        .table(Veiculos::Table)
                        .col(Veiculos::Marca)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("IX_Veiculos_Ano")
                        .table(Veiculos::Table)
                        .col(Veiculos::Ano)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("IX_Veiculos_Marca_Nome")
                        .table(Veiculos::Table)
                        .col(Veiculos::Marca)
                        .col(Veiculos::Nome)
                        .to_owned(),
                )
                .await?;

            // Seed the bootstrap administrator account.
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(Administradores::Table)
                        .columns([
                            Administradores::Id,
                            Administradores::Email,
                            Administradores::Senha,
                            Administradores::Perfil,
                            Administradores::DataCriacao,
                            Administradores::CriadoPor,
                        ])
                        .values_panic([
                            1.into(),
                            "administrador@teste.com".into(),
                            password::hash_password("123456").into(),
                            "Adm".into(),
                            Expr::current_timestamp().into(),
                            SYSTEM_ACTOR.into(),
                        ])
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Administradores::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Veiculos::Table).to_owned())
                .await
        }
    }

    /// Fabrication-year bounds, evaluated by the database so violating
    /// writes are rejected rather than clamped.
    fn year_bounds(backend: DbBackend) -> SimpleExpr {
        let sql = match backend {
            DbBackend::MySql => "`Ano` >= 1900 AND `Ano` <= YEAR(CURDATE()) + 1",
            DbBackend::Sqlite => {
                "\"Ano\" >= 1900 AND \"Ano\" <= CAST(strftime('%Y', 'now') AS INTEGER) + 1"
            }
            DbBackend::Postgres => {
                "\"Ano\" >= 1900 AND \"Ano\" <= EXTRACT(YEAR FROM CURRENT_DATE) + 1"
            }
        };
        Expr::cust(sql)
    }

    #[derive(DeriveIden)]
    enum Administradores {
        #[sea_orm(iden = "Administradores")]
        Table,
        #[sea_orm(iden = "Id")]
        Id,
        #[sea_orm(iden = "Email")]
        Email,
        #[sea_orm(iden = "Senha")]
        Senha,
        #[sea_orm(iden = "Perfil")]
        Perfil,
        #[sea_orm(iden = "DataCriacao")]
        DataCriacao,
        #[sea_orm(iden = "DataAtualizacao")]
        DataAtualizacao,
        #[sea_orm(iden = "CriadoPor")]
        CriadoPor,
        #[sea_orm(iden = "AtualizadoPor")]
        AtualizadoPor,
    }

    #[derive(DeriveIden)]
    enum Veiculos {
        #[sea_orm(iden = "Veiculos")]
        Table,
        #[sea_orm(iden = "Id")]
        Id,
        #[sea_orm(iden = "Nome")]
        Nome,
        #[sea_orm(iden = "Marca")]
        Marca,
        #[sea_orm(iden = "Ano")]
        Ano,
        #[sea_orm(iden = "DataCriacao")]
        DataCriacao,
        #[sea_orm(iden = "DataAtualizacao")]
        DataAtualizacao,
        #[sea_orm(iden = "CriadoPor")]
        CriadoPor,
        #[sea_orm(iden = "AtualizadoPor")]
        AtualizadoPor,
    }
}
