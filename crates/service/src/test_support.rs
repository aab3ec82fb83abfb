#![cfg(test)]
use chrono::{DateTime, Duration, FixedOffset, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use configs::DatabaseConfig;
use models::db::connect_and_migrate;
use models::pet::{PetAge, PetSize, PetType};
use models::pet_sitter_service::ServiceType;
use models::{notification_settings, pet, pet_sitter, pet_sitter_service, user};

/// Every test gets its own migrated in-memory database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_and_migrate(&DatabaseConfig::in_memory_sqlite()).await?;
    Ok(db)
}

pub async fn seed_user(db: &DatabaseConnection, email: &str, first_name: &str) -> anyhow::Result<user::Model> {
    let u = user::create(
        db,
        user::NewUser {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: "Tester".into(),
            ..Default::default()
        },
    )
    .await?;
    notification_settings::create_default(db, u.id).await?;
    Ok(u)
}

pub async fn seed_pet(db: &DatabaseConnection, owner: &user::Model, name: &str) -> anyhow::Result<pet::Model> {
    let p = pet::create(
        db,
        owner.id,
        pet::NewPet {
            name: name.to_string(),
            pet_type: PetType::Dog,
            size: PetSize::Small,
            age: PetAge::Adult,
            get_along_with_dogs: true,
            get_along_with_cats: true,
            is_unsure_with_dogs: false,
            is_unsure_with_cats: false,
            special_instructions: None,
            medical_conditions: None,
        },
    )
    .await?;
    Ok(p)
}

/// A sitter in Denver offering walking at 20.00 and boarding at 50.00.
pub async fn seed_sitter(db: &DatabaseConnection, owner: &user::Model) -> anyhow::Result<pet_sitter::Model> {
    let s = pet_sitter::create(
        db,
        owner.id,
        pet_sitter::NewPetSitter {
            city: Some("Denver".into()),
            state: Some("CO".into()),
            zip_code: Some("80202".into()),
            latitude: Some(39.7392),
            longitude: Some(-104.9903),
            daily_rate: Some(Decimal::new(5000, 2)),
            ..Default::default()
        },
    )
    .await?;
    for (service_type, price) in [(ServiceType::Walking, 2000), (ServiceType::Boarding, 5000)] {
        pet_sitter_service::create(
            db,
            s.id,
            pet_sitter_service::NewService { service_type, price: Decimal::new(price, 2), description: None },
        )
        .await?;
    }
    Ok(s)
}

/// Start of a booking window `days` from now.
pub fn days_from_now(days: i64) -> DateTime<FixedOffset> {
    (Utc::now() + Duration::days(days)).into()
}
