//! Create `pet_sitter_service`: (service type, price, active) offered by a sitter.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PetSitterService::Table)
                    .if_not_exists()
                    .col(uuid(PetSitterService::Id).primary_key())
                    .col(uuid(PetSitterService::PetSitterId))
                    .col(integer(PetSitterService::ServiceType))
                    .col(decimal_len(PetSitterService::Price, 16, 2))
                    .col(string_len_null(PetSitterService::Description, 500))
                    .col(boolean(PetSitterService::IsActive).default(true))
                    .col(timestamp_with_time_zone(PetSitterService::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_sitter_service_sitter")
                            .from(PetSitterService::Table, PetSitterService::PetSitterId)
                            .to(PetSitter::Table, PetSitter::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PetSitterService::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PetSitterService { Table, Id, PetSitterId, ServiceType, Price, Description, IsActive, CreatedAt }

#[derive(DeriveIden)]
enum PetSitter { Table, Id }
