use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::user;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PetType {
    #[sea_orm(num_value = 1)]
    Dog,
    #[sea_orm(num_value = 2)]
    Cat,
    #[sea_orm(num_value = 3)]
    Bird,
    #[sea_orm(num_value = 4)]
    Fish,
    #[sea_orm(num_value = 5)]
    Rabbit,
    #[sea_orm(num_value = 6)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PetSize {
    #[sea_orm(num_value = 1)]
    Small,
    #[sea_orm(num_value = 2)]
    Medium,
    #[sea_orm(num_value = 3)]
    Large,
    #[sea_orm(num_value = 4)]
    ExtraLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PetAge {
    #[sea_orm(num_value = 1)]
    Puppy,
    #[sea_orm(num_value = 2)]
    Adult,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub pet_type: PetType,
    pub size: PetSize,
    pub age: PetAge,
    pub get_along_with_dogs: bool,
    pub get_along_with_cats: bool,
    pub is_unsure_with_dogs: bool,
    pub is_unsure_with_cats: bool,
    pub special_instructions: Option<String>,
    pub medical_conditions: Option<String>,
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

#[derive(Clone, Debug)]
pub struct NewPet {
    pub name: String,
    pub pet_type: PetType,
    pub size: PetSize,
    pub age: PetAge,
    pub get_along_with_dogs: bool,
    pub get_along_with_cats: bool,
    pub is_unsure_with_dogs: bool,
    pub is_unsure_with_cats: bool,
    pub special_instructions: Option<String>,
    pub medical_conditions: Option<String>,
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("pet name required".into()));
    }
    errors::require_len("name", name, 1, 100)
}

pub fn validate_notes(special_instructions: Option<&str>, medical_conditions: Option<&str>) -> Result<(), ModelError> {
    errors::optional_max_len("special_instructions", special_instructions, 1000)?;
    errors::optional_max_len("medical_conditions", medical_conditions, 500)
}

pub async fn create<C: ConnectionTrait>(db: &C, user_id: Uuid, input: NewPet) -> Result<Model, ModelError> {
    validate_name(&input.name)?;
    validate_notes(input.special_instructions.as_deref(), input.medical_conditions.as_deref())?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(input.name),
        pet_type: Set(input.pet_type),
        size: Set(input.size),
        age: Set(input.age),
        get_along_with_dogs: Set(input.get_along_with_dogs),
        get_along_with_cats: Set(input.get_along_with_cats),
        is_unsure_with_dogs: Set(input.is_unsure_with_dogs),
        is_unsure_with_cats: Set(input.is_unsure_with_cats),
        special_instructions: Set(input.special_instructions),
        medical_conditions: Set(input.medical_conditions),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// Looks a pet up by id, scoped to its owner.
pub async fn find_owned<C: ConnectionTrait>(db: &C, user_id: Uuid, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id)
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?)
}
