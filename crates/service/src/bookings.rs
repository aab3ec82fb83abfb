//! Booking requests between a customer and a sitter, and the messages
//! exchanged on them.
//!
//! Only the two participants ever see a booking. Everyone else gets
//! `NotFound`, so ids of other people's bookings stay hidden.

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::booking::{self, BookingParty, BookingStatus};
use models::pet_sitter_service::{self, ServiceType};
use models::{booking_message, errors::optional_max_len, pet, pet_sitter, user};

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::patch::Patch;
use crate::users;
use crate::views::{BookingView, MessageView, SitterView};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub pet_sitter_id: Uuid,
    pub pet_id: Uuid,
    pub service_type: ServiceType,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateBooking {
    pub start_date: Patch<DateTime<FixedOffset>>,
    pub end_date: Patch<DateTime<FixedOffset>>,
    pub special_instructions: Patch<String>,
    pub status: Patch<BookingStatus>,
}

impl UpdateBooking {
    fn touches_details(&self) -> bool {
        !(self.start_date.is_unchanged() && self.end_date.is_unchanged() && self.special_instructions.is_unchanged())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostMessage {
    pub message: String,
}

/// A booking as seen by one of its participants.
struct Participation {
    booking: booking::Model,
    party: BookingParty,
}

/// Resolves which side `caller` is on, or `NotFound` for outsiders.
async fn participation<C: ConnectionTrait>(db: &C, caller: Uuid, booking_id: Uuid) -> Result<Participation, ServiceError> {
    let b = booking::Entity::find_by_id(booking_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("booking"))?;
    if b.user_id == caller {
        return Ok(Participation { booking: b, party: BookingParty::Customer });
    }
    match pet_sitter::Entity::find_by_id(b.pet_sitter_id).one(db).await? {
        Some(s) if s.user_id == caller => Ok(Participation { booking: b, party: BookingParty::Sitter }),
        _ => Err(ServiceError::not_found("booking")),
    }
}

async fn service_price<C: ConnectionTrait>(
    db: &C,
    pet_sitter_id: Uuid,
    service_type: ServiceType,
) -> Result<rust_decimal::Decimal, ServiceError> {
    pet_sitter_service::find_active(db, pet_sitter_id, service_type)
        .await?
        .map(|s| s.price)
        .ok_or_else(|| ServiceError::Validation(format!("pet sitter does not offer {service_type:?}")))
}

/// Booking with customer, sitter and pet attached.
async fn detail<C: ConnectionTrait>(db: &C, b: booking::Model) -> Result<BookingView, ServiceError> {
    let customer = user::Entity::find_by_id(b.user_id).one(db).await?;
    let sitter = pet_sitter::Entity::find_by_id(b.pet_sitter_id).one(db).await?;
    let pet = pet::Entity::find_by_id(b.pet_id).one(db).await?;
    let mut view = BookingView::from(b);
    view.user = customer.map(Into::into);
    view.pet_sitter = sitter.map(SitterView::from);
    view.pet = pet.map(Into::into);
    Ok(view)
}

/// Request a booking with a sitter for one of the caller's pets.
pub async fn create_booking(db: &DatabaseConnection, customer_id: Uuid, input: CreateBooking) -> Result<BookingView, ServiceError> {
    booking::validate_window(&input.start_date, &input.end_date)?;
    optional_max_len("special_instructions", input.special_instructions.as_deref(), 1000)?;

    let txn = db.begin().await?;
    pet::find_owned(&txn, customer_id, input.pet_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet"))?;
    let sitter = pet_sitter::Entity::find_by_id(input.pet_sitter_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet sitter"))?;
    if sitter.user_id == customer_id {
        return Err(ServiceError::Conflict("cannot book yourself".into()));
    }
    if !sitter.is_available {
        return Err(ServiceError::Conflict("pet sitter is not available".into()));
    }
    let price = service_price(&txn, sitter.id, input.service_type).await?;

    let created = booking::create(
        &txn,
        booking::NewBooking {
            user_id: customer_id,
            pet_sitter_id: sitter.id,
            pet_id: input.pet_id,
            service_type: input.service_type,
            start_date: input.start_date,
            end_date: input.end_date,
            special_instructions: input.special_instructions,
            total_amount: booking::total_for(price, &input.start_date, &input.end_date)?,
        },
    )
    .await?;
    let view = detail(&txn, created).await?;
    txn.commit().await?;
    info!(booking_id = %view.id, pet_sitter_id = %view.pet_sitter_id, total = %view.total_amount, "booking_created");
    Ok(view)
}

pub async fn get_booking(db: &DatabaseConnection, caller: Uuid, booking_id: Uuid) -> Result<BookingView, ServiceError> {
    let p = participation(db, caller, booking_id).await?;
    detail(db, p.booking).await
}

/// Bookings where the caller is the customer or the sitter, latest start first.
pub async fn list_bookings(db: &DatabaseConnection, caller: Uuid, pagination: Pagination) -> Result<Page<BookingView>, ServiceError> {
    let (page_idx, per_page) = pagination.normalize();
    let mut scope = Condition::any().add(booking::Column::UserId.eq(caller));
    if let Some(s) = pet_sitter::find_by_user(db, caller).await? {
        scope = scope.add(booking::Column::PetSitterId.eq(s.id));
    }
    let paginator = booking::Entity::find()
        .filter(scope)
        .order_by_desc(booking::Column::StartDate)
        .order_by_desc(booking::Column::CreatedAt)
        .paginate(db, per_page);
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page_idx).await?;
    Ok(Page::new(rows.into_iter().map(BookingView::from).collect(), page_idx, per_page, total))
}

/// Change details (customer, while pending) and/or move the status.
pub async fn update_booking(
    db: &DatabaseConnection,
    caller: Uuid,
    booking_id: Uuid,
    input: UpdateBooking,
) -> Result<BookingView, ServiceError> {
    let txn = db.begin().await?;
    let Participation { booking: current, party } = participation(&txn, caller, booking_id).await?;

    if input.touches_details() {
        if party != BookingParty::Customer {
            return Err(ServiceError::Forbidden("only the customer can change booking details".into()));
        }
        if current.status != BookingStatus::Pending {
            return Err(ServiceError::Conflict("booking details can only change while pending".into()));
        }
    }
    if let Some(text) = input.special_instructions.as_set() {
        optional_max_len("special_instructions", Some(text), 1000)?;
    }

    let to = input.status.into_required("status")?;
    if let Some(to) = to {
        if !current.status.can_transition(to, party) {
            let other = match party {
                BookingParty::Customer => BookingParty::Sitter,
                BookingParty::Sitter => BookingParty::Customer,
            };
            return Err(if current.status.can_transition(to, other) {
                ServiceError::Forbidden(format!("{party:?} cannot move a booking to {to:?}").to_lowercase())
            } else {
                ServiceError::Conflict(format!("cannot move booking from {:?} to {to:?}", current.status))
            });
        }
    }

    let start = input.start_date.into_required("startDate")?;
    let end = input.end_date.into_required("endDate")?;
    let mut am: booking::ActiveModel = current.clone().into();
    if start.is_some() || end.is_some() {
        let start = start.unwrap_or(current.start_date);
        let end = end.unwrap_or(current.end_date);
        booking::validate_window(&start, &end)?;
        let price = service_price(&txn, current.pet_sitter_id, current.service_type).await?;
        am.start_date = Set(start);
        am.end_date = Set(end);
        am.total_amount = Set(booking::total_for(price, &start, &end)?);
    }
    input.special_instructions.apply_optional(&mut am.special_instructions);
    if let Some(to) = to {
        am.status = Set(to);
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&txn).await?;
    let view = detail(&txn, updated).await?;
    txn.commit().await?;
    info!(booking_id = %view.id, status = ?view.status, "booking_updated");
    Ok(view)
}

/// Customer-only removal of a booking that never went ahead.
pub async fn delete_booking(db: &DatabaseConnection, caller: Uuid, booking_id: Uuid) -> Result<(), ServiceError> {
    let p = participation(db, caller, booking_id).await?;
    if p.party != BookingParty::Customer {
        return Err(ServiceError::Forbidden("only the customer can delete a booking".into()));
    }
    if !p.booking.status.is_deletable() {
        return Err(ServiceError::Conflict(format!("cannot delete a {:?} booking", p.booking.status).to_lowercase()));
    }
    booking::Entity::delete_by_id(p.booking.id).exec(db).await?;
    info!(booking_id = %booking_id, "booking_deleted");
    Ok(())
}

pub async fn list_messages(db: &DatabaseConnection, caller: Uuid, booking_id: Uuid) -> Result<Vec<MessageView>, ServiceError> {
    let p = participation(db, caller, booking_id).await?;
    let rows = booking_message::list_for_booking(db, p.booking.id).await?;
    let senders = users::by_ids(db, rows.iter().map(|m| m.sender_id)).await?;
    Ok(rows
        .into_iter()
        .map(|m| {
            let sender = senders.get(&m.sender_id).cloned();
            MessageView::new(m, sender)
        })
        .collect())
}

pub async fn post_message(
    db: &DatabaseConnection,
    caller: Uuid,
    booking_id: Uuid,
    input: PostMessage,
) -> Result<MessageView, ServiceError> {
    let p = participation(db, caller, booking_id).await?;
    let created = booking_message::create(db, p.booking.id, caller, &input.message).await?;
    let sender = user::Entity::find_by_id(caller).one(db).await?;
    info!(booking_id = %booking_id, message_id = %created.id, "booking_message_posted");
    Ok(MessageView::new(created, sender))
}
