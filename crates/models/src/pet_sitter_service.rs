use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::pet_sitter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ServiceType {
    #[sea_orm(num_value = 1)]
    Boarding,
    #[sea_orm(num_value = 2)]
    DayCare,
    #[sea_orm(num_value = 3)]
    Walking,
    #[sea_orm(num_value = 4)]
    Sitting,
    #[sea_orm(num_value = 5)]
    Grooming,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet_sitter_service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pet_sitter_id: Uuid,
    pub service_type: ServiceType,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub price: Decimal,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { PetSitter }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::PetSitter => Entity::belongs_to(pet_sitter::Entity)
                .from(Column::PetSitterId)
                .to(pet_sitter::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Largest price or rate a sitter may charge per unit.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

pub fn validate_price(field: &str, price: Decimal) -> Result<(), ModelError> {
    if price.is_sign_negative() {
        return Err(ModelError::Validation(format!("{field} must not be negative")));
    }
    if price > MAX_PRICE {
        return Err(ModelError::Validation(format!("{field} must not exceed {MAX_PRICE}")));
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct NewService {
    pub service_type: ServiceType,
    pub price: Decimal,
    pub description: Option<String>,
}

pub async fn create<C: ConnectionTrait>(db: &C, pet_sitter_id: Uuid, input: NewService) -> Result<Model, ModelError> {
    validate_price("price", input.price)?;
    errors::optional_max_len("description", input.description.as_deref(), 500)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        pet_sitter_id: Set(pet_sitter_id),
        service_type: Set(input.service_type),
        price: Set(input.price),
        description: Set(input.description),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn list_for_sitter<C: ConnectionTrait>(db: &C, pet_sitter_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::PetSitterId.eq(pet_sitter_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// The active offering of `service_type` by a sitter, if any.
pub async fn find_active<C: ConnectionTrait>(
    db: &C,
    pet_sitter_id: Uuid,
    service_type: ServiceType,
) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::PetSitterId.eq(pet_sitter_id))
        .filter(Column::ServiceType.eq(service_type))
        .filter(Column::IsActive.eq(true))
        .one(db)
        .await?)
}
