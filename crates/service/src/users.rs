use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::errors::optional_max_len;
use models::user;

use crate::errors::ServiceError;
use crate::patch::Patch;
use crate::views::UserView;
use crate::IN_LIST_CHUNK;

/// Profile fields a user may change about themselves.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfile {
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
    pub email: Patch<String>,
    pub zip_code: Patch<String>,
    pub how_did_you_hear: Patch<String>,
}

/// Get a user's own profile.
pub async fn get_profile(db: &DatabaseConnection, user_id: Uuid) -> Result<UserView, ServiceError> {
    let found = user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    Ok(found.into())
}

/// Partially update a profile. Changing the email checks it is not taken.
pub async fn update_profile(db: &DatabaseConnection, user_id: Uuid, input: UpdateProfile) -> Result<UserView, ServiceError> {
    let current = user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?;

    let email = input.email.map(|e| user::normalize_email(&e));
    if let Some(first) = input.first_name.as_set() {
        user::validate_name("first_name", first)?;
    }
    if let Some(last) = input.last_name.as_set() {
        user::validate_name("last_name", last)?;
    }
    if let Some(email) = email.as_set() {
        user::validate_email(email)?;
        if email != &current.email {
            if let Some(other) = user::find_by_email(db, email).await? {
                if other.id != user_id {
                    return Err(ServiceError::Conflict("email already in use".into()));
                }
            }
        }
    }
    if let Some(zip) = input.zip_code.as_set() {
        optional_max_len("zip_code", Some(zip), 10)?;
    }
    if let Some(how) = input.how_did_you_hear.as_set() {
        optional_max_len("how_did_you_hear", Some(how), 500)?;
    }

    let mut am: user::ActiveModel = current.into();
    input.first_name.apply_required("firstName", &mut am.first_name)?;
    input.last_name.apply_required("lastName", &mut am.last_name)?;
    email.apply_required("email", &mut am.email)?;
    input.zip_code.apply_optional(&mut am.zip_code);
    input.how_did_you_hear.apply_optional(&mut am.how_did_you_hear);
    am.updated_at = Set(Utc::now().into());
    let updated = am
        .update(db)
        .await
        .map_err(|e| ServiceError::from(e).conflict_as("email already in use"))?;
    info!(user_id = %updated.id, "user_profile_updated");
    Ok(updated.into())
}

/// Loads the given users keyed by id; unknown ids are skipped.
pub(crate) async fn by_ids<C, I>(db: &C, ids: I) -> Result<HashMap<Uuid, user::Model>, ServiceError>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = Uuid>,
{
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    let mut found = HashMap::with_capacity(ids.len());
    for chunk in ids.chunks(IN_LIST_CHUNK) {
        let rows = user::Entity::find().filter(user::Column::Id.is_in(chunk.to_vec())).all(db).await?;
        found.extend(rows.into_iter().map(|u| (u.id, u)));
    }
    Ok(found)
}
