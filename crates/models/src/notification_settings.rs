use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::user;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub email_notifications: bool,
    pub marketing_emails: bool,
    pub sms_notifications: bool,
    pub message_notifications: bool,
    pub new_inquiries: bool,
    pub new_messages: bool,
    pub booking_requests: bool,
    pub booking_declined: bool,
    pub mms_support: bool,
    pub quiet_hours: bool,
    pub marketing_sms: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Inserts the default toggles for a user: transactional channels on,
/// marketing and extras off.
pub async fn create_default<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        email_notifications: Set(true),
        marketing_emails: Set(false),
        sms_notifications: Set(true),
        message_notifications: Set(true),
        new_inquiries: Set(true),
        new_messages: Set(true),
        booking_requests: Set(true),
        booking_declined: Set(true),
        mms_support: Set(false),
        quiet_hours: Set(false),
        marketing_sms: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?)
}
