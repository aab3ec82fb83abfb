use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::booking::{self, BookingStatus};
use models::{pet_sitter, review, user};

use crate::errors::ServiceError;
use crate::users;
use crate::views::ReviewView;
use crate::IN_LIST_CHUNK;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub booking_id: Uuid,
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Mean and count of a set of ratings; `(0.0, 0)` when empty.
pub fn aggregate(ratings: &[i32]) -> (f64, i32) {
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    (sum as f64 / ratings.len() as f64, ratings.len() as i32)
}

/// Recomputes a sitter's rating from every review addressed to its user.
pub async fn refresh_rating<C: ConnectionTrait>(db: &C, sitter: pet_sitter::Model) -> Result<pet_sitter::Model, ServiceError> {
    let ratings: Vec<i32> = review::Entity::find()
        .select_only()
        .column(review::Column::Rating)
        .filter(review::Column::RevieweeId.eq(sitter.user_id))
        .into_tuple()
        .all(db)
        .await?;
    let (average, total) = aggregate(&ratings);

    let mut am: pet_sitter::ActiveModel = sitter.into();
    am.average_rating = Set(average);
    am.total_reviews = Set(total);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

/// Review a completed booking as its customer.
pub async fn create_review(db: &DatabaseConnection, reviewer_id: Uuid, input: CreateReview) -> Result<ReviewView, ServiceError> {
    review::validate_rating(input.rating)?;

    let txn = db.begin().await?;
    let b = booking::Entity::find_by_id(input.booking_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("booking"))?;
    if b.user_id != reviewer_id {
        return Err(ServiceError::Forbidden("only the customer can review a booking".into()));
    }
    if b.status != BookingStatus::Completed {
        return Err(ServiceError::Conflict("only completed bookings can be reviewed".into()));
    }
    if review::find_for_booking(&txn, b.id, reviewer_id).await?.is_some() {
        return Err(ServiceError::Conflict("booking already reviewed".into()));
    }
    let sitter = pet_sitter::Entity::find_by_id(b.pet_sitter_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet sitter"))?;

    let created = review::create(&txn, reviewer_id, sitter.user_id, b.id, input.rating, input.comment)
        .await
        .map_err(|e| ServiceError::from(e).conflict_as("booking already reviewed"))?;
    let sitter = refresh_rating(&txn, sitter).await?;
    let reviewer = user::Entity::find_by_id(reviewer_id).one(&txn).await?;
    txn.commit().await?;

    info!(
        review_id = %created.id,
        pet_sitter_id = %sitter.id,
        average_rating = sitter.average_rating,
        total_reviews = sitter.total_reviews,
        "review_created"
    );
    Ok(ReviewView::new(created, reviewer))
}

/// Reviews keyed by reviewee (user) id, newest first, each with its reviewer.
pub(crate) async fn reviews_by_reviewee<C, I>(db: &C, reviewee_ids: I) -> Result<HashMap<Uuid, Vec<ReviewView>>, ServiceError>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = Uuid>,
{
    let ids: Vec<Uuid> = reviewee_ids.into_iter().collect();
    let mut rows = Vec::new();
    for chunk in ids.chunks(IN_LIST_CHUNK) {
        let found = review::Entity::find()
            .filter(review::Column::RevieweeId.is_in(chunk.to_vec()))
            .order_by_desc(review::Column::CreatedAt)
            .all(db)
            .await?;
        rows.extend(found);
    }
    let reviewers = users::by_ids(db, rows.iter().map(|r| r.reviewer_id)).await?;
    let mut grouped: HashMap<Uuid, Vec<ReviewView>> = HashMap::new();
    for r in rows {
        let reviewer = reviewers.get(&r.reviewer_id).cloned();
        grouped.entry(r.reviewee_id).or_default().push(ReviewView::new(r, reviewer));
    }
    Ok(grouped)
}

pub async fn list_reviews(db: &DatabaseConnection, pet_sitter_id: Uuid) -> Result<Vec<ReviewView>, ServiceError> {
    let sitter = pet_sitter::Entity::find_by_id(pet_sitter_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet sitter"))?;
    let mut grouped = reviews_by_reviewee(db, [sitter.user_id]).await?;
    Ok(grouped.remove(&sitter.user_id).unwrap_or_default())
}
