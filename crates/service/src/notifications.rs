use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::notification_settings;

use crate::errors::ServiceError;
use crate::patch::Patch;
use crate::views::NotificationSettingsView;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateNotificationSettings {
    pub email_notifications: Patch<bool>,
    pub marketing_emails: Patch<bool>,
    pub sms_notifications: Patch<bool>,
    pub message_notifications: Patch<bool>,
    pub new_inquiries: Patch<bool>,
    pub new_messages: Patch<bool>,
    pub booking_requests: Patch<bool>,
    pub booking_declined: Patch<bool>,
    pub mms_support: Patch<bool>,
    pub quiet_hours: Patch<bool>,
    pub marketing_sms: Patch<bool>,
}

async fn load_or_create(db: &DatabaseConnection, user_id: Uuid) -> Result<notification_settings::Model, ServiceError> {
    if let Some(found) = notification_settings::find_by_user(db, user_id).await? {
        return Ok(found);
    }
    match notification_settings::create_default(db, user_id).await {
        Ok(created) => Ok(created),
        // Lost a race with a concurrent first read; the row exists now.
        Err(models::errors::ModelError::Conflict(_)) => notification_settings::find_by_user(db, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("notification settings")),
        Err(e) => Err(e.into()),
    }
}

/// Current settings, creating the defaults on first access.
pub async fn get_settings(db: &DatabaseConnection, user_id: Uuid) -> Result<NotificationSettingsView, ServiceError> {
    Ok(load_or_create(db, user_id).await?.into())
}

pub async fn update_settings(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: UpdateNotificationSettings,
) -> Result<NotificationSettingsView, ServiceError> {
    let current = load_or_create(db, user_id).await?;
    let mut am: notification_settings::ActiveModel = current.into();
    input.email_notifications.apply_required("emailNotifications", &mut am.email_notifications)?;
    input.marketing_emails.apply_required("marketingEmails", &mut am.marketing_emails)?;
    input.sms_notifications.apply_required("smsNotifications", &mut am.sms_notifications)?;
    input.message_notifications.apply_required("messageNotifications", &mut am.message_notifications)?;
    input.new_inquiries.apply_required("newInquiries", &mut am.new_inquiries)?;
    input.new_messages.apply_required("newMessages", &mut am.new_messages)?;
    input.booking_requests.apply_required("bookingRequests", &mut am.booking_requests)?;
    input.booking_declined.apply_required("bookingDeclined", &mut am.booking_declined)?;
    input.mms_support.apply_required("mmsSupport", &mut am.mms_support)?;
    input.quiet_hours.apply_required("quietHours", &mut am.quiet_hours)?;
    input.marketing_sms.apply_required("marketingSms", &mut am.marketing_sms)?;
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(user_id = %user_id, "notification_settings_updated");
    Ok(updated.into())
}
