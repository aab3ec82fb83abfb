//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220101_000001_create_user;
mod m20220101_000002_create_user_credentials;
mod m20220101_000003_create_notification_settings;
mod m20220101_000004_create_pet;
mod m20220101_000005_create_pet_sitter;
mod m20220101_000006_create_pet_sitter_service;
mod m20220101_000007_create_booking;
mod m20220101_000008_create_booking_message;
mod m20220101_000009_create_review;
mod m20220101_000010_create_refresh_token;
mod m20220101_000020_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000001_create_user::Migration),
            Box::new(m20220101_000002_create_user_credentials::Migration),
            Box::new(m20220101_000003_create_notification_settings::Migration),
            Box::new(m20220101_000004_create_pet::Migration),
            Box::new(m20220101_000005_create_pet_sitter::Migration),
            Box::new(m20220101_000006_create_pet_sitter_service::Migration),
            Box::new(m20220101_000007_create_booking::Migration),
            Box::new(m20220101_000008_create_booking_message::Migration),
            Box::new(m20220101_000009_create_review::Migration),
            Box::new(m20220101_000010_create_refresh_token::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000020_add_indexes::Migration),
        ]
    }
}
