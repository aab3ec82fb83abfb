use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::user;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "refresh_token")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub secret_hash: String,
    pub expires_at: DateTimeWithTimeZone,
    pub revoked_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn is_usable(&self, now: DateTime<FixedOffset>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
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

pub async fn create<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    user_id: Uuid,
    secret_hash: String,
    expires_at: DateTime<FixedOffset>,
) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(id),
        user_id: Set(user_id),
        secret_hash: Set(secret_hash),
        expires_at: Set(expires_at),
        revoked_at: Set(None),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn revoke<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), ModelError> {
    Entity::update_many()
        .col_expr(Column::RevokedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())))
        .filter(Column::Id.eq(id))
        .filter(Column::RevokedAt.is_null())
        .exec(db)
        .await?;
    Ok(())
}

/// Revokes every live token of a user; returns how many were revoked.
pub async fn revoke_all_for_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::RevokedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())))
        .filter(Column::UserId.eq(user_id))
        .filter(Column::RevokedAt.is_null())
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
