//! OpenAPI document served at `/api-docs/openapi.json`.
//!
//! The schema types below only describe payloads; handlers use the service
//! types directly.

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{IntoParams, Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc {
    pub message: String,
    pub details: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub zip_code: Option<String>,
    pub how_did_you_hear: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLoginRequest {
    /// `google` or `facebook`
    pub provider: String,
    pub token: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequestDoc {
    pub refresh_token: String,
}

#[derive(Serialize, ToSchema)]
pub struct ValidateTokenDoc {
    pub token: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponseDoc {
    pub is_valid: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub zip_code: Option<String>,
    pub how_did_you_hear: Option<String>,
    pub created_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthSessionDoc {
    pub token: String,
    /// `<id>.<secret>`, exchanged at `/api/auth/refresh`
    pub refresh_token: String,
    pub expiration: String,
    pub user: UserDoc,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateDoc {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub zip_code: Option<String>,
    pub how_did_you_hear: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetInputDoc {
    pub name: String,
    /// Dog, Cat, Bird, Rabbit, Fish or Other
    #[serde(rename = "type")]
    pub pet_type: String,
    /// Small, Medium, Large or ExtraLarge
    pub size: String,
    /// Puppy or Adult
    pub age: String,
    pub get_along_with_dogs: bool,
    pub get_along_with_cats: bool,
    pub is_unsure_with_dogs: bool,
    pub is_unsure_with_cats: bool,
    pub special_instructions: Option<String>,
    pub medical_conditions: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetDoc {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: PetInputDoc,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SitterServiceDoc {
    pub id: Uuid,
    pub pet_sitter_id: Uuid,
    /// Boarding, DayCare, Walking, Sitting or Grooming
    pub service_type: String,
    pub price: f64,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SitterServiceInputDoc {
    pub service_type: String,
    pub price: f64,
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SitterInputDoc {
    pub about: Option<String>,
    pub skills: Option<String>,
    pub home_details: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Update only
    pub is_available: Option<bool>,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    pub overnight_rate: Option<f64>,
    /// Create only
    pub services: Option<Vec<SitterServiceInputDoc>>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInputDoc {
    pub booking_id: Uuid,
    /// 1..=5
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDoc {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: String,
    pub reviewer: Option<UserDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SitterDoc {
    pub id: Uuid,
    pub user_id: Uuid,
    pub about: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_star_sitter: bool,
    pub is_available: bool,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    pub overnight_rate: Option<f64>,
    pub average_rating: f64,
    pub total_reviews: i32,
    pub user: Option<UserDoc>,
    pub services: Vec<SitterServiceDoc>,
    pub reviews: Vec<ReviewDoc>,
    /// Present on geo searches only
    pub distance_in_miles: Option<f64>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct SitterSearchParams {
    /// Case-sensitive substring of city, state or zip code
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Defaults to 25
    pub radius_in_miles: Option<f64>,
    pub service_type: Option<String>,
    pub max_price: Option<f64>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// 1-based, default 1
    pub page: Option<u32>,
    /// 1..=100, default 20
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingInputDoc {
    pub pet_sitter_id: Uuid,
    pub pet_id: Uuid,
    pub service_type: String,
    pub start_date: String,
    pub end_date: String,
    pub special_instructions: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdateDoc {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub special_instructions: Option<String>,
    /// Pending, Confirmed, InProgress, Completed, Cancelled or Declined
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDoc {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pet_sitter_id: Uuid,
    pub pet_id: Uuid,
    pub service_type: String,
    pub start_date: String,
    pub end_date: String,
    pub special_instructions: Option<String>,
    pub total_amount: f64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingPageDoc {
    pub items: Vec<BookingDoc>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

#[derive(Serialize, ToSchema)]
pub struct MessageInputDoc {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageDoc {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub sender_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
    pub sender: Option<UserDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettingsUpdateDoc {
    pub email_notifications: Option<bool>,
    pub marketing_emails: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub message_notifications: Option<bool>,
    pub new_inquiries: Option<bool>,
    pub new_messages: Option<bool>,
    pub booking_requests: Option<bool>,
    pub booking_declined: Option<bool>,
    pub mms_support: Option<bool>,
    pub quiet_hours: Option<bool>,
    pub marketing_sms: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettingsDoc {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub toggles: NotificationSettingsUpdateDoc,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::social_login,
        crate::routes::auth::refresh,
        crate::routes::auth::validate_token,
        crate::routes::auth::logout,
        crate::routes::pets::list,
        crate::routes::pets::create,
        crate::routes::pets::get,
        crate::routes::pets::update,
        crate::routes::pets::delete,
        crate::routes::sitters::create,
        crate::routes::sitters::profile,
        crate::routes::sitters::update,
        crate::routes::sitters::delete,
        crate::routes::sitters::search,
        crate::routes::sitters::get,
        crate::routes::sitters::reviews,
        crate::routes::sitters::create_review,
        crate::routes::bookings::list,
        crate::routes::bookings::create,
        crate::routes::bookings::get,
        crate::routes::bookings::update,
        crate::routes::bookings::delete,
        crate::routes::bookings::messages,
        crate::routes::bookings::post_message,
        crate::routes::account::profile,
        crate::routes::account::update_profile,
        crate::routes::account::settings,
        crate::routes::account::update_settings,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            RegisterRequest,
            LoginRequest,
            SocialLoginRequest,
            RefreshRequestDoc,
            ValidateTokenDoc,
            ValidateTokenResponseDoc,
            UserDoc,
            AuthSessionDoc,
            ProfileUpdateDoc,
            PetInputDoc,
            PetDoc,
            SitterServiceDoc,
            SitterServiceInputDoc,
            SitterInputDoc,
            SitterDoc,
            ReviewInputDoc,
            ReviewDoc,
            BookingInputDoc,
            BookingUpdateDoc,
            BookingDoc,
            BookingPageDoc,
            MessageInputDoc,
            MessageDoc,
            NotificationSettingsUpdateDoc,
            NotificationSettingsDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "pets"),
        (name = "petsitters"),
        (name = "bookings"),
        (name = "notifications"),
        (name = "users")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
