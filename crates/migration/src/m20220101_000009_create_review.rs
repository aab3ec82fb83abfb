//! Create `review` table. Uniqueness of (booking, reviewer) is added with the
//! other indexes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(uuid(Review::Id).primary_key())
                    .col(uuid(Review::ReviewerId))
                    .col(uuid(Review::RevieweeId))
                    .col(uuid(Review::BookingId))
                    .col(integer(Review::Rating))
                    .col(string_len_null(Review::Comment, 1000))
                    .col(timestamp_with_time_zone(Review::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_reviewer")
                            .from(Review::Table, Review::ReviewerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_reviewee")
                            .from(Review::Table, Review::RevieweeId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_booking")
                            .from(Review::Table, Review::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Review { Table, Id, ReviewerId, RevieweeId, BookingId, Rating, Comment, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Booking { Table, Id }
