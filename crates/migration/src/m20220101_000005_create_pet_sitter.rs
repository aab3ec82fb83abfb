//! Create `pet_sitter` table: one profile per user.
//!
//! `average_rating` and `total_reviews` are derived from `review` and are
//! rewritten whenever a review is created.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PetSitter::Table)
                    .if_not_exists()
                    .col(uuid(PetSitter::Id).primary_key())
                    .col(uuid(PetSitter::UserId).unique_key())
                    .col(string_len_null(PetSitter::About, 1000))
                    .col(string_len_null(PetSitter::Skills, 500))
                    .col(string_len_null(PetSitter::HomeDetails, 500))
                    .col(string_len_null(PetSitter::Address, 200))
                    .col(string_len_null(PetSitter::City, 100))
                    .col(string_len_null(PetSitter::State, 50))
                    .col(string_len_null(PetSitter::ZipCode, 10))
                    .col(double_null(PetSitter::Latitude))
                    .col(double_null(PetSitter::Longitude))
                    .col(boolean(PetSitter::IsStarSitter).default(false))
                    .col(boolean(PetSitter::IsAvailable).default(true))
                    .col(decimal_len_null(PetSitter::HourlyRate, 16, 2))
                    .col(decimal_len_null(PetSitter::DailyRate, 16, 2))
                    .col(decimal_len_null(PetSitter::OvernightRate, 16, 2))
                    .col(double(PetSitter::AverageRating).default(0.0))
                    .col(integer(PetSitter::TotalReviews).default(0))
                    .col(timestamp_with_time_zone(PetSitter::CreatedAt))
                    .col(timestamp_with_time_zone(PetSitter::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_sitter_user")
                            .from(PetSitter::Table, PetSitter::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PetSitter::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PetSitter {
    Table,
    Id,
    UserId,
    About,
    Skills,
    HomeDetails,
    Address,
    City,
    State,
    ZipCode,
    Latitude,
    Longitude,
    IsStarSitter,
    IsAvailable,
    HourlyRate,
    DailyRate,
    OvernightRate,
    AverageRating,
    TotalReviews,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
