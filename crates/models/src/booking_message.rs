use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::{booking, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking_message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub booking_id: Uuid,
    pub sender_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Booking,
    Sender,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Booking => Entity::belongs_to(booking::Entity)
                .from(Column::BookingId)
                .to(booking::Column::Id)
                .into(),
            Relation::Sender => Entity::belongs_to(user::Entity)
                .from(Column::SenderId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, booking_id: Uuid, sender_id: Uuid, message: &str) -> Result<Model, ModelError> {
    if message.trim().is_empty() {
        return Err(ModelError::Validation("message required".into()));
    }
    errors::require_len("message", message, 1, 1000)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_id: Set(booking_id),
        sender_id: Set(sender_id),
        message: Set(message.to_string()),
        is_read: Set(false),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

/// Conversation in the order it was written.
pub async fn list_for_booking<C: ConnectionTrait>(db: &C, booking_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::BookingId.eq(booking_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}
