use anyhow::Result;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

use super::setup_test_db;
use crate::errors::ModelError;
use crate::pet::{PetAge, PetSize, PetType};
use crate::pet_sitter_service::ServiceType;
use crate::{notification_settings, pet, pet_sitter, pet_sitter_service, refresh_token, user, user_credentials};

pub(crate) fn new_user(email: &str) -> user::NewUser {
    user::NewUser {
        email: email.to_string(),
        first_name: "Riley".into(),
        last_name: "Morgan".into(),
        ..Default::default()
    }
}

pub(crate) fn new_pet(name: &str) -> pet::NewPet {
    pet::NewPet {
        name: name.to_string(),
        pet_type: PetType::Dog,
        size: PetSize::Medium,
        age: PetAge::Adult,
        get_along_with_dogs: true,
        get_along_with_cats: false,
        is_unsure_with_dogs: false,
        is_unsure_with_cats: true,
        special_instructions: None,
        medical_conditions: None,
    }
}

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = user::create(&db, new_user("riley@example.com")).await?;
    assert_eq!(created.full_name(), "Riley Morgan");

    let found = user::find_by_email(&db, "riley@example.com").await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));

    let shouted = user::find_by_email(&db, " RILEY@Example.com ").await?;
    assert_eq!(shouted.map(|u| u.id), Some(created.id));
    let err = user::create(&db, new_user("Riley@EXAMPLE.com")).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)));

    let mut am: user::ActiveModel = created.clone().into();
    am.zip_code = Set(Some("94110".into()));
    let updated = am.update(&db).await?;
    assert_eq!(updated.zip_code.as_deref(), Some("94110"));

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_money_columns_hold_largest_amounts() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, new_user("rich@example.com")).await?;
    let sitter = pet_sitter::create(
        &db,
        u.id,
        pet_sitter::NewPetSitter { daily_rate: Some(pet_sitter_service::MAX_PRICE), ..Default::default() },
    )
    .await?;
    let service = pet_sitter_service::create(
        &db,
        sitter.id,
        pet_sitter_service::NewService {
            service_type: ServiceType::Boarding,
            price: pet_sitter_service::MAX_PRICE,
            description: None,
        },
    )
    .await?;
    assert_eq!(service.price, pet_sitter_service::MAX_PRICE);
    let stored = pet_sitter::Entity::find_by_id(sitter.id).one(&db).await?;
    assert_eq!(stored.and_then(|s| s.daily_rate), Some(pet_sitter_service::MAX_PRICE));

    let over = pet_sitter_service::NewService {
        service_type: ServiceType::Walking,
        price: pet_sitter_service::MAX_PRICE + Decimal::ONE,
        description: None,
    };
    let err = pet_sitter_service::create(&db, sitter.id, over).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn test_user_validation() -> Result<()> {
    let db = setup_test_db().await?;

    let err = user::create(&db, new_user("not-an-email")).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));

    let mut long_name = new_user("long@example.com");
    long_name.first_name = "x".repeat(51);
    let err = user::create(&db, long_name).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));

    // Blank names are a caller-level rule.
    assert!(user::validate_name("last_name", "  ").is_err());
    let mut no_last = new_user("social@example.com");
    no_last.last_name = String::new();
    assert!(user::create(&db, no_last).await.is_ok());
    Ok(())
}

#[tokio::test]
async fn test_credentials_upsert() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, new_user("creds@example.com")).await?;

    let first = user_credentials::upsert_password(&db, u.id, "hash-1".into(), "argon2id").await?;
    let second = user_credentials::upsert_password(&db, u.id, "hash-2".into(), "argon2id").await?;
    assert_eq!(first.id, second.id);

    let stored = user_credentials::find_by_user(&db, u.id).await?.expect("credentials");
    assert_eq!(stored.password_hash, "hash-2");

    let err = user_credentials::upsert_password(&db, u.id, " ".into(), "argon2id").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn test_notification_defaults() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, new_user("notify@example.com")).await?;

    let s = notification_settings::create_default(&db, u.id).await?;
    assert!(s.email_notifications && s.sms_notifications && s.booking_requests);
    assert!(!s.marketing_emails && !s.mms_support && !s.quiet_hours && !s.marketing_sms);

    let found = notification_settings::find_by_user(&db, u.id).await?;
    assert_eq!(found, Some(s));
    Ok(())
}

#[tokio::test]
async fn test_pet_scoped_to_owner() -> Result<()> {
    let db = setup_test_db().await?;
    let owner = user::create(&db, new_user("owner@example.com")).await?;
    let other = user::create(&db, new_user("other@example.com")).await?;

    let p = pet::create(&db, owner.id, new_pet("Biscuit")).await?;
    assert_eq!(p.pet_type, PetType::Dog);
    assert!(pet::find_owned(&db, owner.id, p.id).await?.is_some());
    assert!(pet::find_owned(&db, other.id, p.id).await?.is_none());

    let err = pet::create(&db, owner.id, new_pet("")).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));

    let mut notes = new_pet("Pepper");
    notes.medical_conditions = Some("m".repeat(501));
    assert!(pet::create(&db, owner.id, notes).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_sitter_and_services() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, new_user("sitter@example.com")).await?;

    let s = pet_sitter::create(
        &db,
        u.id,
        pet_sitter::NewPetSitter {
            city: Some("Portland".into()),
            daily_rate: Some(Decimal::new(4000, 2)),
            ..Default::default()
        },
    )
    .await?;
    assert!(s.is_available);
    assert!(!s.is_star_sitter);
    assert_eq!(s.total_reviews, 0);
    assert_eq!(s.daily_rate, Some(Decimal::new(4000, 2)));

    pet_sitter_service::create(
        &db,
        s.id,
        pet_sitter_service::NewService { service_type: ServiceType::Walking, price: Decimal::new(2000, 2), description: None },
    )
    .await?;
    let boarding = pet_sitter_service::create(
        &db,
        s.id,
        pet_sitter_service::NewService { service_type: ServiceType::Boarding, price: Decimal::new(5500, 2), description: None },
    )
    .await?;

    let services = pet_sitter_service::list_for_sitter(&db, s.id).await?;
    assert_eq!(services.len(), 2);

    let mut inactive: pet_sitter_service::ActiveModel = boarding.into();
    inactive.is_active = Set(false);
    inactive.update(&db).await?;
    assert!(pet_sitter_service::find_active(&db, s.id, ServiceType::Boarding).await?.is_none());
    assert!(pet_sitter_service::find_active(&db, s.id, ServiceType::Walking).await?.is_some());

    let bad_rate = pet_sitter::NewPetSitter { hourly_rate: Some(Decimal::new(-1, 0)), ..Default::default() };
    assert!(pet_sitter::validate_new(&bad_rate).is_err());
    let bad_lat = pet_sitter::NewPetSitter { latitude: Some(91.0), ..Default::default() };
    assert!(pet_sitter::validate_new(&bad_lat).is_err());
    Ok(())
}

#[tokio::test]
async fn test_refresh_token_revocation() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, new_user("refresh@example.com")).await?;
    let expires = (Utc::now() + Duration::days(30)).into();

    let a = refresh_token::create(&db, Uuid::new_v4(), u.id, "h1".into(), expires).await?;
    let b = refresh_token::create(&db, Uuid::new_v4(), u.id, "h2".into(), expires).await?;
    assert!(a.is_usable(Utc::now().into()));

    refresh_token::revoke(&db, a.id).await?;
    let a = refresh_token::Entity::find_by_id(a.id).one(&db).await?.expect("token a");
    assert!(!a.is_usable(Utc::now().into()));

    assert_eq!(refresh_token::revoke_all_for_user(&db, u.id).await?, 1);
    let b = refresh_token::Entity::find_by_id(b.id).one(&db).await?.expect("token b");
    assert!(b.revoked_at.is_some());

    let expired = refresh_token::create(&db, Uuid::new_v4(), u.id, "h3".into(), (Utc::now() - Duration::minutes(1)).into()).await?;
    assert!(!expired.is_usable(Utc::now().into()));
    Ok(())
}
