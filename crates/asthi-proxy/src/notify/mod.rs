//! Appointment reminders over SMS (Twilio) and email (SendGrid).

pub mod email;
pub mod sms;

use serde::{Deserialize, Serialize};

use asthi_core::models::notification::NotificationRequest;

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::transport::Transport;

use email::EmailAck;
use sms::SmsAck;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationAck {
    Sms(SmsAck),
    Email(EmailAck),
}

/// Route a reminder to the channel its shape asks for.
pub async fn dispatch(
    transport: &dyn Transport,
    config: &ProxyConfig,
    request: &NotificationRequest,
) -> Result<NotificationAck, ProxyError> {
    match request {
        NotificationRequest::Sms(req) => sms::send_sms(transport, config, req)
            .await
            .map(NotificationAck::Sms),
        NotificationRequest::Email(req) => email::send_email(transport, config, req)
            .await
            .map(NotificationAck::Email),
    }
}
