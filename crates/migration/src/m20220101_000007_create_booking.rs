//! Create `booking` table.
//!
//! Customer, sitter and pet references are RESTRICT: a pet or sitter profile
//! with bookings cannot be removed until the bookings are.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(uuid(Booking::UserId))
                    .col(uuid(Booking::PetSitterId))
                    .col(uuid(Booking::PetId))
                    .col(integer(Booking::ServiceType))
                    .col(timestamp_with_time_zone(Booking::StartDate))
                    .col(timestamp_with_time_zone(Booking::EndDate))
                    .col(string_len_null(Booking::SpecialInstructions, 1000))
                    .col(decimal_len(Booking::TotalAmount, 16, 2))
                    .col(integer(Booking::Status))
                    .col(timestamp_with_time_zone(Booking::CreatedAt))
                    .col(timestamp_with_time_zone(Booking::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user")
                            .from(Booking::Table, Booking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_pet_sitter")
                            .from(Booking::Table, Booking::PetSitterId)
                            .to(PetSitter::Table, PetSitter::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_pet")
                            .from(Booking::Table, Booking::PetId)
                            .to(Pet::Table, Pet::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Booking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Booking {
    Table,
    Id,
    UserId,
    PetSitterId,
    PetId,
    ServiceType,
    StartDate,
    EndDate,
    SpecialInstructions,
    TotalAmount,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum PetSitter { Table, Id }

#[derive(DeriveIden)]
enum Pet { Table, Id }
