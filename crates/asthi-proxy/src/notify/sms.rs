use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use asthi_core::models::notification::SmsRequest;

use crate::config::{require, ProxyConfig, TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN, TWILIO_PHONE_NUMBER};
use crate::error::ProxyError;
use crate::transport::{Auth, RequestBody, Transport, VendorRequest};

pub const SERVICE: &str = "twilio";
const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Acknowledgment returned to the client after Twilio accepted the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsAck {
    pub success: bool,
    pub message: String,
    /// Number the message was sent to, in E.164 form.
    pub phone: String,
    /// Twilio message SID.
    pub sid: String,
    pub message_body: String,
}

#[derive(Deserialize)]
struct TwilioMessage {
    sid: String,
}

pub fn reminder_body(patient_name: &str, appointment_date: &str) -> String {
    format!(
        "Asthi Care Appointment Reminder\n\
         \n\
         Dear {patient_name},\n\
         \n\
         Your follow-up appointment is scheduled for:\n\
         {appointment_date} at 10:00 AM\n\
         \n\
         Please arrive 10 minutes early. Reply STOP to unsubscribe.\n\
         \n\
         - Asthi Care Team"
    )
}

/// Send an appointment reminder by SMS.
///
/// The phone number is validated and normalized before anything else;
/// an invalid number never reaches Twilio.
pub async fn send_sms(
    transport: &dyn Transport,
    config: &ProxyConfig,
    request: &SmsRequest,
) -> Result<SmsAck, ProxyError> {
    let phone = request.validate().inspect_err(|e| {
        warn!(reason = %e, "rejected sms request");
    })?;

    let account_sid = require(&config.twilio.account_sid, TWILIO_ACCOUNT_SID)?;
    let auth_token = require(&config.twilio.auth_token, TWILIO_AUTH_TOKEN)?;
    let from_number = require(&config.twilio.from_number, TWILIO_PHONE_NUMBER)?;

    let message_body = reminder_body(&request.patient_name, &request.appointment_date);

    let response = transport
        .send(VendorRequest {
            service: SERVICE,
            url: format!("{TWILIO_API_BASE}/Accounts/{account_sid}/Messages.json"),
            auth: Auth::Basic {
                username: account_sid.clone(),
                password: auth_token.clone(),
            },
            body: RequestBody::Form(vec![
                ("To", phone.clone()),
                ("From", from_number.clone()),
                ("Body", message_body.clone()),
            ]),
        })
        .await?;

    if !response.is_success() {
        let err = response.into_error(SERVICE);
        error!(error = %err, detail = err.vendor_detail(), "twilio rejected sms");
        return Err(err);
    }

    let message: TwilioMessage = response.json(SERVICE)?;

    info!(sid = %message.sid, "sms sent");

    Ok(SmsAck {
        success: true,
        message: "SMS sent successfully".to_string(),
        phone,
        sid: message.sid,
        message_body,
    })
}
