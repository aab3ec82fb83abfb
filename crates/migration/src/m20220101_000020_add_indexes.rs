use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const PLAIN_INDEXES: &[&str] = &[
    "idx_pet_user",
    "idx_pet_sitter_available",
    "idx_sitter_service_sitter",
    "idx_booking_user",
    "idx_booking_sitter",
    "idx_booking_pet",
    "idx_booking_message_booking",
    "idx_review_reviewee",
    "idx_refresh_token_user",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pet: owner lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_user")
                    .table(Pet::Table)
                    .col(Pet::UserId)
                    .to_owned(),
            )
            .await?;

        // PetSitter: search starts from available profiles
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_sitter_available")
                    .table(PetSitter::Table)
                    .col(PetSitter::IsAvailable)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sitter_service_sitter")
                    .table(PetSitterService::Table)
                    .col(PetSitterService::PetSitterId)
                    .to_owned(),
            )
            .await?;

        // Booking: one index per participant reference
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_user")
                    .table(Booking::Table)
                    .col(Booking::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_sitter")
                    .table(Booking::Table)
                    .col(Booking::PetSitterId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_pet")
                    .table(Booking::Table)
                    .col(Booking::PetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_message_booking")
                    .table(BookingMessage::Table)
                    .col(BookingMessage::BookingId)
                    .to_owned(),
            )
            .await?;

        // Review: rating aggregation scans by reviewee
        manager
            .create_index(
                Index::create()
                    .name("idx_review_reviewee")
                    .table(Review::Table)
                    .col(Review::RevieweeId)
                    .to_owned(),
            )
            .await?;

        // Review: composite unique (booking_id, reviewer_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_review_booking_reviewer")
                    .table(Review::Table)
                    .col(Review::BookingId)
                    .col(Review::ReviewerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_refresh_token_user")
                    .table(RefreshToken::Table)
                    .col(RefreshToken::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uniq_review_booking_reviewer")
                    .table(Review::Table)
                    .to_owned(),
            )
            .await?;
        for name in PLAIN_INDEXES {
            manager
                .drop_index(Index::drop().name(*name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Pet { Table, UserId }

#[derive(DeriveIden)]
enum PetSitter { Table, IsAvailable }

#[derive(DeriveIden)]
enum PetSitterService { Table, PetSitterId }

#[derive(DeriveIden)]
enum Booking { Table, UserId, PetSitterId, PetId }

#[derive(DeriveIden)]
enum BookingMessage { Table, BookingId }

#[derive(DeriveIden)]
enum Review { Table, RevieweeId, BookingId, ReviewerId }

#[derive(DeriveIden)]
enum RefreshToken { Table, UserId }
