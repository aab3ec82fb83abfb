use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::{booking, user};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Reviewer,
    Reviewee,
    Booking,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Reviewer => Entity::belongs_to(user::Entity)
                .from(Column::ReviewerId)
                .to(user::Column::Id)
                .into(),
            Relation::Reviewee => Entity::belongs_to(user::Entity)
                .from(Column::RevieweeId)
                .to(user::Column::Id)
                .into(),
            Relation::Booking => Entity::belongs_to(booking::Entity)
                .from(Column::BookingId)
                .to(booking::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_rating(rating: i32) -> Result<(), ModelError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ModelError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    reviewer_id: Uuid,
    reviewee_id: Uuid,
    booking_id: Uuid,
    rating: i32,
    comment: Option<String>,
) -> Result<Model, ModelError> {
    validate_rating(rating)?;
    errors::optional_max_len("comment", comment.as_deref(), 1000)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        reviewer_id: Set(reviewer_id),
        reviewee_id: Set(reviewee_id),
        booking_id: Set(booking_id),
        rating: Set(rating),
        comment: Set(comment),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_for_booking<C: ConnectionTrait>(
    db: &C,
    booking_id: Uuid,
    reviewer_id: Uuid,
) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::BookingId.eq(booking_id))
        .filter(Column::ReviewerId.eq(reviewer_id))
        .one(db)
        .await?)
}
