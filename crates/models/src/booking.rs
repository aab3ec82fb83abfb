use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::pet_sitter_service::ServiceType;
use crate::{pet, pet_sitter, user};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Largest amount a `decimal(16, 2)` column holds.
pub const MAX_TOTAL: Decimal = Decimal::from_parts(1_874_919_423, 2_328_306, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum BookingStatus {
    #[sea_orm(num_value = 1)]
    Pending,
    #[sea_orm(num_value = 2)]
    Confirmed,
    #[sea_orm(num_value = 3)]
    InProgress,
    #[sea_orm(num_value = 4)]
    Completed,
    #[sea_orm(num_value = 5)]
    Cancelled,
    #[sea_orm(num_value = 6)]
    Declined,
}

/// Which side of a booking is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingParty {
    Customer,
    Sitter,
}

impl BookingStatus {
    /// Status moves each party may perform.
    ///
    /// Customers may only cancel while the booking has not started. Sitters
    /// accept or decline requests and drive a confirmed booking to completion.
    pub fn can_transition(self, to: BookingStatus, party: BookingParty) -> bool {
        use BookingStatus::*;
        match party {
            BookingParty::Customer => matches!((self, to), (Pending, Cancelled) | (Confirmed, Cancelled)),
            BookingParty::Sitter => matches!(
                (self, to),
                (Pending, Confirmed)
                    | (Pending, Declined)
                    | (Confirmed, InProgress)
                    | (Confirmed, Cancelled)
                    | (InProgress, Completed)
            ),
        }
    }

    /// Whether the customer may remove the booking outright.
    pub fn is_deletable(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Cancelled | BookingStatus::Declined)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub pet_sitter_id: Uuid,
    pub pet_id: Uuid,
    pub service_type: ServiceType,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub special_instructions: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    PetSitter,
    Pet,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::PetSitter => Entity::belongs_to(pet_sitter::Entity)
                .from(Column::PetSitterId)
                .to(pet_sitter::Column::Id)
                .into(),
            Relation::Pet => Entity::belongs_to(pet::Entity)
                .from(Column::PetId)
                .to(pet::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub pet_sitter_id: Uuid,
    pub pet_id: Uuid,
    pub service_type: ServiceType,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    pub special_instructions: Option<String>,
    pub total_amount: Decimal,
}

pub fn validate_window(start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> Result<(), ModelError> {
    if end <= start {
        return Err(ModelError::Validation("end_date must be after start_date".into()));
    }
    Ok(())
}

/// Number of started 24h periods in the window, never less than one.
pub fn billable_days(start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> i64 {
    let secs = (*end - *start).num_seconds().max(0);
    ((secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).max(1)
}

pub fn total_for(price: Decimal, start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> Result<Decimal, ModelError> {
    price
        .checked_mul(Decimal::from(billable_days(start, end)))
        .filter(|total| *total <= MAX_TOTAL)
        .ok_or_else(|| ModelError::Validation("booking total is too large".into()))
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewBooking) -> Result<Model, ModelError> {
    validate_window(&input.start_date, &input.end_date)?;
    errors::optional_max_len("special_instructions", input.special_instructions.as_deref(), 1000)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(input.user_id),
        pet_sitter_id: Set(input.pet_sitter_id),
        pet_id: Set(input.pet_id),
        service_type: Set(input.service_type),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        special_instructions: Set(input.special_instructions),
        total_amount: Set(input.total_amount),
        status: Set(BookingStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
