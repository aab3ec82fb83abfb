use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::pet::{self, PetAge, PetSize, PetType};

use crate::errors::ServiceError;
use crate::patch::Patch;
use crate::views::PetView;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePet {
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub size: PetSize,
    pub age: PetAge,
    #[serde(default)]
    pub get_along_with_dogs: bool,
    #[serde(default)]
    pub get_along_with_cats: bool,
    #[serde(default)]
    pub is_unsure_with_dogs: bool,
    #[serde(default)]
    pub is_unsure_with_cats: bool,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub medical_conditions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePet {
    pub name: Patch<String>,
    #[serde(rename = "type")]
    pub pet_type: Patch<PetType>,
    pub size: Patch<PetSize>,
    pub age: Patch<PetAge>,
    pub get_along_with_dogs: Patch<bool>,
    pub get_along_with_cats: Patch<bool>,
    pub is_unsure_with_dogs: Patch<bool>,
    pub is_unsure_with_cats: Patch<bool>,
    pub special_instructions: Patch<String>,
    pub medical_conditions: Patch<String>,
}

/// Create a pet owned by `user_id`.
pub async fn create_pet(db: &DatabaseConnection, user_id: Uuid, input: CreatePet) -> Result<PetView, ServiceError> {
    let created = pet::create(
        db,
        user_id,
        pet::NewPet {
            name: input.name,
            pet_type: input.pet_type,
            size: input.size,
            age: input.age,
            get_along_with_dogs: input.get_along_with_dogs,
            get_along_with_cats: input.get_along_with_cats,
            is_unsure_with_dogs: input.is_unsure_with_dogs,
            is_unsure_with_cats: input.is_unsure_with_cats,
            special_instructions: input.special_instructions,
            medical_conditions: input.medical_conditions,
        },
    )
    .await?;
    info!(pet_id = %created.id, user_id = %user_id, "pet_created");
    Ok(created.into())
}

/// Get a pet; pets of other owners are reported as missing.
pub async fn get_pet(db: &DatabaseConnection, user_id: Uuid, pet_id: Uuid) -> Result<PetView, ServiceError> {
    let found = pet::find_owned(db, user_id, pet_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet"))?;
    Ok(found.into())
}

/// List a user's pets ordered by name.
pub async fn list_pets(db: &DatabaseConnection, user_id: Uuid) -> Result<Vec<PetView>, ServiceError> {
    let pets = pet::Entity::find()
        .filter(pet::Column::UserId.eq(user_id))
        .order_by_asc(pet::Column::Name)
        .all(db)
        .await?;
    Ok(pets.into_iter().map(PetView::from).collect())
}

pub async fn update_pet(db: &DatabaseConnection, user_id: Uuid, pet_id: Uuid, input: UpdatePet) -> Result<PetView, ServiceError> {
    let current = pet::find_owned(db, user_id, pet_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet"))?;

    if let Some(name) = input.name.as_set() {
        pet::validate_name(name)?;
    }
    pet::validate_notes(
        input.special_instructions.as_set().map(String::as_str),
        input.medical_conditions.as_set().map(String::as_str),
    )?;

    let mut am: pet::ActiveModel = current.into();
    input.name.apply_required("name", &mut am.name)?;
    input.pet_type.apply_required("type", &mut am.pet_type)?;
    input.size.apply_required("size", &mut am.size)?;
    input.age.apply_required("age", &mut am.age)?;
    input.get_along_with_dogs.apply_required("getAlongWithDogs", &mut am.get_along_with_dogs)?;
    input.get_along_with_cats.apply_required("getAlongWithCats", &mut am.get_along_with_cats)?;
    input.is_unsure_with_dogs.apply_required("isUnsureWithDogs", &mut am.is_unsure_with_dogs)?;
    input.is_unsure_with_cats.apply_required("isUnsureWithCats", &mut am.is_unsure_with_cats)?;
    input.special_instructions.apply_optional(&mut am.special_instructions);
    input.medical_conditions.apply_optional(&mut am.medical_conditions);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(pet_id = %updated.id, "pet_updated");
    Ok(updated.into())
}

/// Delete a pet. Returns `false` when the caller owns no such pet.
pub async fn delete_pet(db: &DatabaseConnection, user_id: Uuid, pet_id: Uuid) -> Result<bool, ServiceError> {
    let res = pet::Entity::delete_many()
        .filter(pet::Column::Id.eq(pet_id))
        .filter(pet::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::from(e).conflict_as("pet has bookings and cannot be deleted"))?;
    if res.rows_affected > 0 {
        info!(pet_id = %pet_id, "pet_deleted");
    }
    Ok(res.rows_affected > 0)
}
