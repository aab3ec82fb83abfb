//! Create `booking_message`: conversation attached to a booking.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingMessage::Table)
                    .if_not_exists()
                    .col(uuid(BookingMessage::Id).primary_key())
                    .col(uuid(BookingMessage::BookingId))
                    .col(uuid(BookingMessage::SenderId))
                    .col(string_len(BookingMessage::Message, 1000))
                    .col(boolean(BookingMessage::IsRead).default(false))
                    .col(timestamp_with_time_zone(BookingMessage::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_message_booking")
                            .from(BookingMessage::Table, BookingMessage::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_message_sender")
                            .from(BookingMessage::Table, BookingMessage::SenderId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BookingMessage { Table, Id, BookingId, SenderId, Message, IsRead, CreatedAt }

#[derive(DeriveIden)]
enum Booking { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
