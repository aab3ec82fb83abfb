//! Serializable views returned by the services.
//!
//! Entities never leave the crate directly: credentials and other internal
//! columns stay behind, related rows are attached explicitly.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use models::booking::BookingStatus;
use models::pet::{PetAge, PetSize, PetType};
use models::pet_sitter_service::ServiceType;
use models::{booking, booking_message, notification_settings, pet, pet_sitter, pet_sitter_service, review, user};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub zip_code: Option<String>,
    pub how_did_you_hear: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<user::Model> for UserView {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            zip_code: u.zip_code,
            how_did_you_hear: u.how_did_you_hear,
            created_at: u.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetView {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub size: PetSize,
    pub age: PetAge,
    pub get_along_with_dogs: bool,
    pub get_along_with_cats: bool,
    pub is_unsure_with_dogs: bool,
    pub is_unsure_with_cats: bool,
    pub special_instructions: Option<String>,
    pub medical_conditions: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<pet::Model> for PetView {
    fn from(p: pet::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            pet_type: p.pet_type,
            size: p.size,
            age: p.age,
            get_along_with_dogs: p.get_along_with_dogs,
            get_along_with_cats: p.get_along_with_cats,
            is_unsure_with_dogs: p.is_unsure_with_dogs,
            is_unsure_with_cats: p.is_unsure_with_cats,
            special_instructions: p.special_instructions,
            medical_conditions: p.medical_conditions,
            user_id: p.user_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitterServiceView {
    pub id: Uuid,
    pub pet_sitter_id: Uuid,
    pub service_type: ServiceType,
    pub price: Decimal,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<FixedOffset>,
}

impl From<pet_sitter_service::Model> for SitterServiceView {
    fn from(s: pet_sitter_service::Model) -> Self {
        Self {
            id: s.id,
            pet_sitter_id: s.pet_sitter_id,
            service_type: s.service_type,
            price: s.price,
            description: s.description,
            is_active: s.is_active,
            created_at: s.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub reviewer: Option<UserView>,
}

impl ReviewView {
    pub fn new(r: review::Model, reviewer: Option<user::Model>) -> Self {
        Self {
            id: r.id,
            reviewer_id: r.reviewer_id,
            reviewee_id: r.reviewee_id,
            booking_id: r.booking_id,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
            reviewer: reviewer.map(UserView::from),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitterView {
    pub id: Uuid,
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
    pub hourly_rate: Option<Decimal>,
    pub daily_rate: Option<Decimal>,
    pub overnight_rate: Option<Decimal>,
    pub average_rating: f64,
    pub total_reviews: i32,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub user: Option<UserView>,
    pub services: Vec<SitterServiceView>,
    pub reviews: Vec<ReviewView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_in_miles: Option<f64>,
}

impl From<pet_sitter::Model> for SitterView {
    fn from(s: pet_sitter::Model) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            about: s.about,
            skills: s.skills,
            home_details: s.home_details,
            address: s.address,
            city: s.city,
            state: s.state,
            zip_code: s.zip_code,
            latitude: s.latitude,
            longitude: s.longitude,
            is_star_sitter: s.is_star_sitter,
            is_available: s.is_available,
            hourly_rate: s.hourly_rate,
            daily_rate: s.daily_rate,
            overnight_rate: s.overnight_rate,
            average_rating: s.average_rating,
            total_reviews: s.total_reviews,
            created_at: s.created_at,
            updated_at: s.updated_at,
            user: None,
            services: Vec::new(),
            reviews: Vec::new(),
            distance_in_miles: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pet_sitter_id: Uuid,
    pub pet_id: Uuid,
    pub service_type: ServiceType,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    pub special_instructions: Option<String>,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_sitter: Option<SitterView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet: Option<PetView>,
}

impl From<booking::Model> for BookingView {
    fn from(b: booking::Model) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            pet_sitter_id: b.pet_sitter_id,
            pet_id: b.pet_id,
            service_type: b.service_type,
            start_date: b.start_date,
            end_date: b.end_date,
            special_instructions: b.special_instructions,
            total_amount: b.total_amount,
            status: b.status,
            created_at: b.created_at,
            updated_at: b.updated_at,
            user: None,
            pet_sitter: None,
            pet: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub sender_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<FixedOffset>,
    pub sender: Option<UserView>,
}

impl MessageView {
    pub fn new(m: booking_message::Model, sender: Option<user::Model>) -> Self {
        Self {
            id: m.id,
            booking_id: m.booking_id,
            sender_id: m.sender_id,
            message: m.message,
            is_read: m.is_read,
            created_at: m.created_at,
            sender: sender.map(UserView::from),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettingsView {
    pub id: Uuid,
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
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<notification_settings::Model> for NotificationSettingsView {
    fn from(n: notification_settings::Model) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            email_notifications: n.email_notifications,
            marketing_emails: n.marketing_emails,
            sms_notifications: n.sms_notifications,
            message_notifications: n.message_notifications,
            new_inquiries: n.new_inquiries,
            new_messages: n.new_messages,
            booking_requests: n.booking_requests,
            booking_declined: n.booking_declined,
            mms_support: n.mms_support,
            quiet_hours: n.quiet_hours,
            marketing_sms: n.marketing_sms,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn pet_view_uses_type_key_and_enum_names() {
        let now = Utc::now().into();
        let view = PetView::from(pet::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Biscuit".into(),
            pet_type: PetType::Rabbit,
            size: PetSize::ExtraLarge,
            age: PetAge::Puppy,
            get_along_with_dogs: true,
            get_along_with_cats: false,
            is_unsure_with_dogs: false,
            is_unsure_with_cats: false,
            special_instructions: None,
            medical_conditions: None,
            created_at: now,
            updated_at: now,
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], "Rabbit");
        assert_eq!(json["size"], "ExtraLarge");
        assert_eq!(json["getAlongWithDogs"], true);
        assert!(json.get("petType").is_none());
    }

    #[test]
    fn sitter_view_hides_distance_until_computed() {
        let now = Utc::now().into();
        let mut view = SitterView::from(pet_sitter::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            about: None,
            skills: None,
            home_details: None,
            address: None,
            city: Some("Austin".into()),
            state: None,
            zip_code: None,
            latitude: None,
            longitude: None,
            is_star_sitter: false,
            is_available: true,
            hourly_rate: Some(Decimal::new(1850, 2)),
            daily_rate: None,
            overnight_rate: None,
            average_rating: 0.0,
            total_reviews: 0,
            created_at: now,
            updated_at: now,
        });
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("distanceInMiles").is_none());
        assert_eq!(json["hourlyRate"], 18.5);

        view.distance_in_miles = Some(3.25);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["distanceInMiles"], 3.25);
    }
}
