use anyhow::Result;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;

use super::crud_tests::{new_pet, new_user};
use super::setup_test_db;
use crate::booking::{self, NewBooking};
use crate::errors::ModelError;
use crate::pet_sitter_service::ServiceType;
use crate::{booking_message, pet, pet_sitter, review, user};

struct Fixture {
    customer: user::Model,
    sitter_user: user::Model,
    sitter: pet_sitter::Model,
    pet: pet::Model,
    booking: booking::Model,
}

async fn fixture(db: &sea_orm::DatabaseConnection) -> Result<Fixture> {
    let customer = user::create(db, new_user("customer@example.com")).await?;
    let sitter_user = user::create(db, new_user("sitter@example.com")).await?;
    let sitter = pet_sitter::create(db, sitter_user.id, Default::default()).await?;
    let pet = pet::create(db, customer.id, new_pet("Mochi")).await?;
    let start = Utc::now() + Duration::days(1);
    let booking = booking::create(
        db,
        NewBooking {
            user_id: customer.id,
            pet_sitter_id: sitter.id,
            pet_id: pet.id,
            service_type: ServiceType::Sitting,
            start_date: start.into(),
            end_date: (start + Duration::days(2)).into(),
            special_instructions: None,
            total_amount: Decimal::new(9000, 2),
        },
    )
    .await?;
    Ok(Fixture { customer, sitter_user, sitter, pet, booking })
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() -> Result<()> {
    let db = setup_test_db().await?;
    user::create(&db, new_user("dup@example.com")).await?;
    let err = user::create(&db, new_user("dup@example.com")).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_one_sitter_profile_per_user() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, new_user("solo@example.com")).await?;
    pet_sitter::create(&db, u.id, Default::default()).await?;
    let err = pet_sitter::create(&db, u.id, Default::default()).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn test_booked_pet_and_sitter_cannot_be_deleted() -> Result<()> {
    let db = setup_test_db().await?;
    let f = fixture(&db).await?;

    let err = pet::Entity::delete_by_id(f.pet.id).exec(&db).await.unwrap_err();
    assert!(matches!(ModelError::from(err), ModelError::Conflict(_)));

    let err = pet_sitter::Entity::delete_by_id(f.sitter.id).exec(&db).await.unwrap_err();
    assert!(matches!(ModelError::from(err), ModelError::Conflict(_)));

    // Once the booking is gone both can be removed.
    booking::Entity::delete_by_id(f.booking.id).exec(&db).await?;
    pet::Entity::delete_by_id(f.pet.id).exec(&db).await?;
    pet_sitter::Entity::delete_by_id(f.sitter.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_messages_cascade_with_booking() -> Result<()> {
    let db = setup_test_db().await?;
    let f = fixture(&db).await?;

    booking_message::create(&db, f.booking.id, f.customer.id, "Hi! Mochi loves walks.").await?;
    booking_message::create(&db, f.booking.id, f.sitter_user.id, "Great, see you then").await?;
    let msgs = booking_message::list_for_booking(&db, f.booking.id).await?;
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[0].sender_id, f.customer.id);

    assert!(booking_message::create(&db, f.booking.id, f.customer.id, "").await.is_err());
    assert!(booking_message::create(&db, f.booking.id, f.customer.id, &"x".repeat(1001)).await.is_err());

    booking::Entity::delete_by_id(f.booking.id).exec(&db).await?;
    assert!(booking_message::list_for_booking(&db, f.booking.id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_one_review_per_booking_and_reviewer() -> Result<()> {
    let db = setup_test_db().await?;
    let f = fixture(&db).await?;

    review::create(&db, f.customer.id, f.sitter_user.id, f.booking.id, 5, Some("Lovely".into())).await?;
    let err = review::create(&db, f.customer.id, f.sitter_user.id, f.booking.id, 4, None).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)));

    assert!(review::find_for_booking(&db, f.booking.id, f.customer.id).await?.is_some());
    assert!(review::find_for_booking(&db, f.booking.id, f.sitter_user.id).await?.is_none());

    for bad in [0, 6, -1] {
        let err = review::create(&db, f.sitter_user.id, f.customer.id, f.booking.id, bad, None).await.unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }
    Ok(())
}

#[tokio::test]
async fn test_deleting_user_cascades_owned_rows() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, new_user("leaving@example.com")).await?;
    let p = pet::create(&db, u.id, new_pet("Ghost")).await?;
    let s = pet_sitter::create(&db, u.id, Default::default()).await?;

    user::Entity::delete_by_id(u.id).exec(&db).await?;
    assert!(pet::Entity::find_by_id(p.id).one(&db).await?.is_none());
    assert!(pet_sitter::Entity::find_by_id(s.id).one(&db).await?.is_none());
    Ok(())
}
