//! Create `notification_settings`: one row of channel toggles per user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NotificationSettings::Table)
                    .if_not_exists()
                    .col(uuid(NotificationSettings::Id).primary_key())
                    .col(uuid(NotificationSettings::UserId).unique_key())
                    .col(boolean(NotificationSettings::EmailNotifications).default(true))
                    .col(boolean(NotificationSettings::MarketingEmails).default(false))
                    .col(boolean(NotificationSettings::SmsNotifications).default(true))
                    .col(boolean(NotificationSettings::MessageNotifications).default(true))
                    .col(boolean(NotificationSettings::NewInquiries).default(true))
                    .col(boolean(NotificationSettings::NewMessages).default(true))
                    .col(boolean(NotificationSettings::BookingRequests).default(true))
                    .col(boolean(NotificationSettings::BookingDeclined).default(true))
                    .col(boolean(NotificationSettings::MmsSupport).default(false))
                    .col(boolean(NotificationSettings::QuietHours).default(false))
                    .col(boolean(NotificationSettings::MarketingSms).default(false))
                    .col(timestamp_with_time_zone(NotificationSettings::CreatedAt))
                    .col(timestamp_with_time_zone(NotificationSettings::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_settings_user")
                            .from(NotificationSettings::Table, NotificationSettings::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NotificationSettings {
    Table,
    Id,
    UserId,
    EmailNotifications,
    MarketingEmails,
    SmsNotifications,
    MessageNotifications,
    NewInquiries,
    NewMessages,
    BookingRequests,
    BookingDeclined,
    MmsSupport,
    QuietHours,
    MarketingSms,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
