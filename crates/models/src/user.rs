use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub zip_code: Option<String>,
    pub how_did_you_hear: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub zip_code: Option<String>,
    pub how_did_you_hear: Option<String>,
}

/// Canonical stored form of an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    errors::require_len("email", email, 3, 255)
}

pub fn validate_name(field: &str, name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    errors::require_len(field, name, 1, 50)
}

/// Names are only length-checked here: social sign-ups may arrive without a
/// last name. Callers that require names use [`validate_name`].
pub async fn create<C: ConnectionTrait>(db: &C, input: NewUser) -> Result<Model, ModelError> {
    let email = normalize_email(&input.email);
    validate_email(&email)?;
    errors::require_len("first_name", &input.first_name, 0, 50)?;
    errors::require_len("last_name", &input.last_name, 0, 50)?;
    errors::optional_max_len("zip_code", input.zip_code.as_deref(), 10)?;
    errors::optional_max_len("how_did_you_hear", input.how_did_you_hear.as_deref(), 500)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        zip_code: Set(input.zip_code),
        how_did_you_hear: Set(input.how_did_you_hear),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(normalize_email(email))).one(db).await?)
}
