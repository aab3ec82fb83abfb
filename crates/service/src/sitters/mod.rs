//! Pet-sitter profiles, search and reviews.

pub mod geo;
pub mod reviews;
pub mod search;

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::pet_sitter_service::{self, ServiceType};
use models::pet_sitter;

use crate::errors::ServiceError;
use crate::patch::Patch;
use crate::users;
use crate::views::{SitterServiceView, SitterView};
use crate::IN_LIST_CHUNK;

pub use reviews::{create_review, list_reviews, CreateReview};
pub use search::SitterSearch;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSitterService {
    pub service_type: ServiceType,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSitter {
    pub about: Option<String>,
    pub skills: Option<String>,
    pub home_details: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub hourly_rate: Option<Decimal>,
    pub daily_rate: Option<Decimal>,
    pub overnight_rate: Option<Decimal>,
    pub services: Vec<CreateSitterService>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSitter {
    pub about: Patch<String>,
    pub skills: Patch<String>,
    pub home_details: Patch<String>,
    pub address: Patch<String>,
    pub city: Patch<String>,
    pub state: Patch<String>,
    pub zip_code: Patch<String>,
    pub latitude: Patch<f64>,
    pub longitude: Patch<f64>,
    pub is_available: Patch<bool>,
    pub hourly_rate: Patch<Decimal>,
    pub daily_rate: Patch<Decimal>,
    pub overnight_rate: Patch<Decimal>,
}

/// Services keyed by sitter id, each list in creation order.
async fn services_by_sitter<C: ConnectionTrait>(
    db: &C,
    sitter_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<pet_sitter_service::Model>>, ServiceError> {
    let mut grouped: HashMap<Uuid, Vec<pet_sitter_service::Model>> = HashMap::new();
    for chunk in sitter_ids.chunks(IN_LIST_CHUNK) {
        let rows = pet_sitter_service::Entity::find()
            .filter(pet_sitter_service::Column::PetSitterId.is_in(chunk.to_vec()))
            .order_by_asc(pet_sitter_service::Column::CreatedAt)
            .all(db)
            .await?;
        for s in rows {
            grouped.entry(s.pet_sitter_id).or_default().push(s);
        }
    }
    Ok(grouped)
}

/// Full public view: user, services and reviews with their reviewers.
async fn detail<C: ConnectionTrait>(db: &C, sitter: pet_sitter::Model) -> Result<SitterView, ServiceError> {
    let services = pet_sitter_service::list_for_sitter(db, sitter.id).await?;
    let reviews = reviews::reviews_by_reviewee(db, [sitter.user_id]).await?.remove(&sitter.user_id);
    let owner = users::by_ids(db, [sitter.user_id]).await?.remove(&sitter.user_id);

    let mut view = SitterView::from(sitter);
    view.user = owner.map(Into::into);
    view.services = services.into_iter().map(SitterServiceView::from).collect();
    view.reviews = reviews.unwrap_or_default();
    Ok(view)
}

/// Become a sitter. A user has at most one profile.
pub async fn create_profile(db: &DatabaseConnection, user_id: Uuid, input: CreateSitter) -> Result<SitterView, ServiceError> {
    let already = "pet sitter profile already exists";
    let txn = db.begin().await?;
    if pet_sitter::find_by_user(&txn, user_id).await?.is_some() {
        return Err(ServiceError::Conflict(already.into()));
    }
    let created = pet_sitter::create(
        &txn,
        user_id,
        pet_sitter::NewPetSitter {
            about: input.about,
            skills: input.skills,
            home_details: input.home_details,
            address: input.address,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
            latitude: input.latitude,
            longitude: input.longitude,
            hourly_rate: input.hourly_rate,
            daily_rate: input.daily_rate,
            overnight_rate: input.overnight_rate,
        },
    )
    .await
    .map_err(|e| ServiceError::from(e).conflict_as(already))?;
    for s in input.services {
        pet_sitter_service::create(
            &txn,
            created.id,
            pet_sitter_service::NewService { service_type: s.service_type, price: s.price, description: s.description },
        )
        .await?;
    }
    let view = detail(&txn, created).await?;
    txn.commit().await?;
    info!(pet_sitter_id = %view.id, user_id = %user_id, services = view.services.len(), "pet_sitter_created");
    Ok(view)
}

pub async fn get_by_id(db: &DatabaseConnection, pet_sitter_id: Uuid) -> Result<SitterView, ServiceError> {
    let sitter = pet_sitter::Entity::find_by_id(pet_sitter_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet sitter"))?;
    detail(db, sitter).await
}

/// The caller's own profile.
pub async fn get_by_user(db: &DatabaseConnection, user_id: Uuid) -> Result<SitterView, ServiceError> {
    let sitter = pet_sitter::find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet sitter profile"))?;
    detail(db, sitter).await
}

pub async fn update_profile(db: &DatabaseConnection, user_id: Uuid, input: UpdateSitter) -> Result<SitterView, ServiceError> {
    let current = pet_sitter::find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet sitter profile"))?;

    for (field, value) in [
        ("about", &input.about),
        ("skills", &input.skills),
        ("home_details", &input.home_details),
        ("address", &input.address),
        ("city", &input.city),
        ("state", &input.state),
        ("zip_code", &input.zip_code),
    ] {
        pet_sitter::validate_text(field, value.as_set().map(String::as_str))?;
    }
    pet_sitter::validate_coordinates(input.latitude.as_set().copied(), input.longitude.as_set().copied())?;
    pet_sitter::validate_rate("hourly_rate", input.hourly_rate.as_set().copied())?;
    pet_sitter::validate_rate("daily_rate", input.daily_rate.as_set().copied())?;
    pet_sitter::validate_rate("overnight_rate", input.overnight_rate.as_set().copied())?;

    let mut am: pet_sitter::ActiveModel = current.into();
    input.about.apply_optional(&mut am.about);
    input.skills.apply_optional(&mut am.skills);
    input.home_details.apply_optional(&mut am.home_details);
    input.address.apply_optional(&mut am.address);
    input.city.apply_optional(&mut am.city);
    input.state.apply_optional(&mut am.state);
    input.zip_code.apply_optional(&mut am.zip_code);
    input.latitude.apply_optional(&mut am.latitude);
    input.longitude.apply_optional(&mut am.longitude);
    input.is_available.apply_required("isAvailable", &mut am.is_available)?;
    input.hourly_rate.apply_optional(&mut am.hourly_rate);
    input.daily_rate.apply_optional(&mut am.daily_rate);
    input.overnight_rate.apply_optional(&mut am.overnight_rate);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(pet_sitter_id = %updated.id, "pet_sitter_updated");
    detail(db, updated).await
}

/// Remove the caller's profile and its services. `false` when there is none.
pub async fn delete_profile(db: &DatabaseConnection, user_id: Uuid) -> Result<bool, ServiceError> {
    let res = pet_sitter::Entity::delete_many()
        .filter(pet_sitter::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::from(e).conflict_as("pet sitter has bookings and cannot be deleted"))?;
    if res.rows_affected > 0 {
        info!(user_id = %user_id, "pet_sitter_deleted");
    }
    Ok(res.rows_affected > 0)
}

/// Search available sitters; see [`search::rank`] for the rules.
pub async fn search_sitters(db: &DatabaseConnection, q: &SitterSearch) -> Result<Vec<SitterView>, ServiceError> {
    let sitters = pet_sitter::Entity::find()
        .filter(pet_sitter::Column::IsAvailable.eq(true))
        .order_by_desc(pet_sitter::Column::AverageRating)
        .order_by_desc(pet_sitter::Column::IsStarSitter)
        .all(db)
        .await?;
    // Profile-only rules first so services are loaded for the survivors only.
    let origin = q.origin();
    let sitters: Vec<pet_sitter::Model> = sitters.into_iter().filter(|s| search::matches_profile(s, q, origin)).collect();
    let ids: Vec<Uuid> = sitters.iter().map(|s| s.id).collect();
    let mut services = services_by_sitter(db, &ids).await?;
    let candidates = sitters
        .into_iter()
        .map(|sitter| {
            let services = services.remove(&sitter.id).unwrap_or_default();
            search::Candidate { sitter, services }
        })
        .collect();

    let ranked = search::rank(candidates, q);
    let user_ids: Vec<Uuid> = ranked.iter().map(|r| r.sitter.user_id).collect();
    let owners = users::by_ids(db, user_ids.iter().copied()).await?;
    let mut reviews = reviews::reviews_by_reviewee(db, user_ids).await?;

    let views: Vec<SitterView> = ranked
        .into_iter()
        .map(|r| {
            let user_id = r.sitter.user_id;
            let mut view = SitterView::from(r.sitter);
            view.user = owners.get(&user_id).cloned().map(Into::into);
            view.services = r.services.into_iter().map(SitterServiceView::from).collect();
            view.reviews = reviews.remove(&user_id).unwrap_or_default();
            view.distance_in_miles = r.distance_in_miles;
            view
        })
        .collect();
    info!(results = views.len(), geo = q.origin().is_some(), "pet_sitter_search");
    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_sitter, seed_user};

    fn create_input() -> CreateSitter {
        serde_json::from_value(serde_json::json!({
            "about": "Dog person",
            "city": "Boulder",
            "state": "CO",
            "zipCode": "80302",
            "latitude": 40.015,
            "longitude": -105.2705,
            "hourlyRate": 18.5,
            "services": [
                { "serviceType": "Walking", "price": 18.5 },
                { "serviceType": "DayCare", "price": 40, "description": "Big yard" }
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_then_read_profile() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = seed_user(&db, "boulder@example.com", "Bea").await?;

        let created = create_profile(&db, u.id, create_input()).await?;
        assert!(created.is_available);
        assert!(!created.is_star_sitter);
        assert_eq!(created.total_reviews, 0);
        assert_eq!(created.services.len(), 2);
        assert_eq!(created.services[0].service_type, ServiceType::Walking);
        assert_eq!(created.user.as_ref().map(|u| u.first_name.as_str()), Some("Bea"));

        let by_id = get_by_id(&db, created.id).await?;
        let by_user = get_by_user(&db, u.id).await?;
        assert_eq!(by_id, by_user);
        assert!(by_id.reviews.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn prices_above_cap_are_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = seed_user(&db, "pricey@example.com", "Pri").await?;
        let mut input = create_input();
        input.services[0].price = pet_sitter_service::MAX_PRICE + Decimal::ONE;
        assert!(matches!(create_profile(&db, u.id, input).await, Err(ServiceError::Validation(_))));

        let input = CreateSitter { daily_rate: Some(Decimal::new(5, 0) * pet_sitter_service::MAX_PRICE), ..create_input() };
        assert!(matches!(create_profile(&db, u.id, input).await, Err(ServiceError::Validation(_))));

        create_profile(&db, u.id, create_input()).await?;
        let patch = UpdateSitter { hourly_rate: Patch::Set(Decimal::MAX), ..Default::default() };
        assert!(matches!(update_profile(&db, u.id, patch).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    /// Bulk-inserts `count` available Austin sitters with no services.
    async fn seed_many_sitters(db: &DatabaseConnection, count: usize) -> Result<Vec<Uuid>, anyhow::Error> {
        use models::user;
        let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();
        let mut sitter_ids = Vec::with_capacity(count);
        for batch in 0..count.div_ceil(100) {
            let size = 100.min(count - batch * 100);
            let user_ids: Vec<Uuid> = (0..size).map(|_| Uuid::new_v4()).collect();
            let users: Vec<user::ActiveModel> = user_ids
                .iter()
                .enumerate()
                .map(|(i, id)| user::ActiveModel {
                    id: Set(*id),
                    email: Set(format!("bulk{}@example.com", batch * 100 + i)),
                    first_name: Set("Bulk".into()),
                    last_name: Set("Sitter".into()),
                    zip_code: Set(None),
                    how_did_you_hear: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                })
                .collect();
            user::Entity::insert_many(users).exec(db).await?;

            for chunk in user_ids.chunks(25) {
                let sitters: Vec<pet_sitter::ActiveModel> = chunk
                    .iter()
                    .map(|user_id| {
                        let id = Uuid::new_v4();
                        sitter_ids.push(id);
                        pet_sitter::ActiveModel {
                            id: Set(id),
                            user_id: Set(*user_id),
                            about: Set(None),
                            skills: Set(None),
                            home_details: Set(None),
                            address: Set(None),
                            city: Set(Some("Austin".into())),
                            state: Set(Some("TX".into())),
                            zip_code: Set(None),
                            latitude: Set(None),
                            longitude: Set(None),
                            is_star_sitter: Set(false),
                            is_available: Set(true),
                            hourly_rate: Set(None),
                            daily_rate: Set(Some(Decimal::new(30, 0))),
                            overnight_rate: Set(None),
                            average_rating: Set(0.0),
                            total_reviews: Set(0),
                            created_at: Set(now),
                            updated_at: Set(now),
                        }
                    })
                    .collect();
                pet_sitter::Entity::insert_many(sitters).exec(db).await?;
            }
        }
        Ok(sitter_ids)
    }

    #[tokio::test]
    async fn search_spans_more_sitters_than_one_id_batch() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let count = IN_LIST_CHUNK * 2 + 100;
        let ids = seed_many_sitters(&db, count).await?;
        let walker = *ids.last().expect("seeded sitters");
        pet_sitter_service::create(
            &db,
            walker,
            pet_sitter_service::NewService { service_type: ServiceType::Walking, price: Decimal::new(15, 0), description: None },
        )
        .await?;

        let all = search_sitters(&db, &SitterSearch::default()).await?;
        assert_eq!(all.len(), search::MAX_RESULTS);

        let q = SitterSearch { service_type: Some(ServiceType::Walking), ..Default::default() };
        let hits = search_sitters(&db, &q).await?;
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![walker]);
        assert_eq!(hits[0].services.len(), 1);

        let q = SitterSearch { location: Some("Denver".into()), ..Default::default() };
        assert!(search_sitters(&db, &q).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn second_profile_conflicts() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = seed_user(&db, "twice@example.com", "Tw").await?;
        create_profile(&db, u.id, create_input()).await?;
        let err = create_profile(&db, u.id, CreateSitter::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(m) if m == "pet sitter profile already exists"));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_profile_creates_nothing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = seed_user(&db, "bad@example.com", "Bad").await?;
        let input = CreateSitter { latitude: Some(123.0), ..create_input() };
        assert!(matches!(create_profile(&db, u.id, input).await, Err(ServiceError::Validation(_))));
        assert!(matches!(get_by_user(&db, u.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_is_partial_and_delete_reports_absence() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = seed_user(&db, "upd@example.com", "Up").await?;
        let created = create_profile(&db, u.id, create_input()).await?;

        let patch: UpdateSitter = serde_json::from_value(serde_json::json!({
            "isAvailable": false,
            "about": null,
            "dailyRate": 55
        }))?;
        let updated = update_profile(&db, u.id, patch).await?;
        assert!(!updated.is_available);
        assert_eq!(updated.about, None);
        assert_eq!(updated.daily_rate, Some(Decimal::new(55, 0)));
        assert_eq!(updated.city, created.city);
        assert_eq!(updated.hourly_rate, created.hourly_rate);

        let clear_flag: UpdateSitter = serde_json::from_str(r#"{"isAvailable": null}"#)?;
        assert!(matches!(update_profile(&db, u.id, clear_flag).await, Err(ServiceError::Validation(_))));

        assert!(delete_profile(&db, u.id).await?);
        assert!(!delete_profile(&db, u.id).await?);
        assert!(matches!(get_by_id(&db, created.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn search_skips_unavailable_and_measures_distance() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = seed_user(&db, "a@example.com", "Ava").await?;
        let b = seed_user(&db, "b@example.com", "Ben").await?;
        let c = seed_user(&db, "c@example.com", "Cy").await?;
        let denver = seed_sitter(&db, &a).await?;
        create_profile(&db, b.id, create_input()).await?;
        seed_sitter(&db, &c).await?;
        update_profile(&db, c.id, serde_json::from_str(r#"{"isAvailable": false}"#)?).await?;

        let all = search_sitters(&db, &SitterSearch::default()).await?;
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|s| s.is_available && s.user.is_some()));

        let q = SitterSearch { location: Some("Denver".into()), ..Default::default() };
        let hits = search_sitters(&db, &q).await?;
        assert_eq!(hits.iter().map(|s| s.id).collect::<Vec<_>>(), vec![denver.id]);
        assert_eq!(hits[0].services.len(), 2);

        let q = SitterSearch {
            latitude: Some(39.75),
            longitude: Some(-104.99),
            radius_in_miles: Some(50.0),
            service_type: Some(ServiceType::Walking),
            ..Default::default()
        };
        let near = search_sitters(&db, &q).await?;
        assert_eq!(near.len(), 2);
        assert_eq!(near[0].id, denver.id);
        let d: Vec<f64> = near.iter().filter_map(|s| s.distance_in_miles).collect();
        assert_eq!(d.len(), 2);
        assert!(d[0] <= d[1]);
        Ok(())
    }
}
