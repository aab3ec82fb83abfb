use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::{pet_sitter_service, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet_sitter")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub about: Option<String>,
    pub skills: Option<String>,
    pub home_details: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_star_sitter: bool,
    pub is_available: bool,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub hourly_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub daily_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub overnight_rate: Option<Decimal>,
    pub average_rating: f64,
    pub total_reviews: i32,
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

#[derive(Clone, Debug, Default)]
pub struct NewPetSitter {
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
}

/// Length limits of the free-text profile columns.
pub const TEXT_LIMITS: [(&str, usize); 7] = [
    ("about", 1000),
    ("skills", 500),
    ("home_details", 500),
    ("address", 200),
    ("city", 100),
    ("state", 50),
    ("zip_code", 10),
];

pub fn validate_text(field: &str, value: Option<&str>) -> Result<(), ModelError> {
    match TEXT_LIMITS.iter().find(|(name, _)| *name == field) {
        Some((_, max)) => errors::optional_max_len(field, value, *max),
        None => Ok(()),
    }
}

pub fn validate_rate(field: &str, value: Option<Decimal>) -> Result<(), ModelError> {
    match value {
        Some(v) => pet_sitter_service::validate_price(field, v),
        None => Ok(()),
    }
}

pub fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), ModelError> {
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ModelError::Validation("latitude must be between -90 and 90".into()));
        }
    }
    if let Some(lon) = longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ModelError::Validation("longitude must be between -180 and 180".into()));
        }
    }
    Ok(())
}

pub fn validate_new(input: &NewPetSitter) -> Result<(), ModelError> {
    validate_text("about", input.about.as_deref())?;
    validate_text("skills", input.skills.as_deref())?;
    validate_text("home_details", input.home_details.as_deref())?;
    validate_text("address", input.address.as_deref())?;
    validate_text("city", input.city.as_deref())?;
    validate_text("state", input.state.as_deref())?;
    validate_text("zip_code", input.zip_code.as_deref())?;
    validate_coordinates(input.latitude, input.longitude)?;
    validate_rate("hourly_rate", input.hourly_rate)?;
    validate_rate("daily_rate", input.daily_rate)?;
    validate_rate("overnight_rate", input.overnight_rate)
}

/// New profiles start available, without star status and with no reviews.
pub async fn create<C: ConnectionTrait>(db: &C, user_id: Uuid, input: NewPetSitter) -> Result<Model, ModelError> {
    validate_new(&input)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        about: Set(input.about),
        skills: Set(input.skills),
        home_details: Set(input.home_details),
        address: Set(input.address),
        city: Set(input.city),
        state: Set(input.state),
        zip_code: Set(input.zip_code),
        latitude: Set(input.latitude),
        longitude: Set(input.longitude),
        is_star_sitter: Set(false),
        is_available: Set(true),
        hourly_rate: Set(input.hourly_rate),
        daily_rate: Set(input.daily_rate),
        overnight_rate: Set(input.overnight_rate),
        average_rating: Set(0.0),
        total_reviews: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?)
}
