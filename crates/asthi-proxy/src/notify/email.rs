use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tera::{Context, Tera};
use tracing::{error, info, warn};

use asthi_core::models::notification::EmailRequest;

use crate::config::{require, ProxyConfig, SENDGRID_API_KEY, SENDGRID_FROM_EMAIL};
use crate::error::ProxyError;
use crate::transport::{Auth, RequestBody, Transport, VendorRequest};

pub const SERVICE: &str = "sendgrid";
const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";
const SUBJECT: &str = "Asthi Care - Appointment Confirmation";

/// Acknowledgment returned after SendGrid accepted the message. Includes
/// the rendered HTML so the client can show a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAck {
    pub success: bool,
    pub message: String,
    pub email: String,
    pub status_code: u16,
    pub email_html: String,
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body { font-family: Arial, sans-serif; margin: 0; padding: 0; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: #4F46E5; color: white; padding: 20px; text-align: center; border-radius: 8px 8px 0 0; }
    .content { padding: 30px; background: #f9fafb; }
    .appointment-box { background: white; padding: 20px; border-left: 4px solid #4F46E5; margin: 20px 0; border-radius: 4px; }
    .footer { text-align: center; padding: 20px; color: #6b7280; font-size: 12px; }
    ul { line-height: 1.8; }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1 style="margin: 0;">Asthi Care</h1>
    </div>
    <div class="content">
      <h2>Follow-Up Reminder</h2>
      <p>Dear {{patient_name}},</p>
      <p>Your follow-up appointment is scheduled for tomorrow!</p>

      <div class="appointment-box">
        <h3 style="margin-top: 0;">Appointment Details</h3>
        <p><strong>Date:</strong> {{appointment_date}}</p>
        <p><strong>Time:</strong> 10:00 AM</p>
        <p><strong>Location:</strong> Asthi Care Clinic</p>
      </div>

      <p><strong>Important Reminders:</strong></p>
      <ul>
        <li>Please arrive 10 minutes early for check-in</li>
        <li>Bring any recent medical reports or test results</li>
        <li>Fasting not required</li>
      </ul>

      <p>If you need to reschedule, please contact us at least 24 hours in advance.</p>
    </div>
    <div class="footer">
      <p>&copy; 2025 Asthi Care. All rights reserved.</p>
      <p>This is an automated message. Please do not reply to this email.</p>
    </div>
  </div>
</body>
</html>"#;

const TEMPLATE_NAME: &str = "reminder.html";

// The `.html` suffix turns on Tera's autoescaping for patient values.
static TEMPLATES: LazyLock<Result<Tera, tera::Error>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
    Ok(tera)
});

/// Render the reminder email. Patient-supplied values are HTML-escaped.
pub fn render_reminder_html(
    patient_name: &str,
    appointment_date: &str,
) -> Result<String, ProxyError> {
    let tera = TEMPLATES
        .as_ref()
        .map_err(|e| ProxyError::Template(e.to_string()))?;

    let mut context = Context::new();
    context.insert("patient_name", patient_name);
    context.insert("appointment_date", appointment_date);

    let rendered = tera.render(TEMPLATE_NAME, &context)?;
    Ok(rendered)
}

/// Send an appointment reminder by email.
pub async fn send_email(
    transport: &dyn Transport,
    config: &ProxyConfig,
    request: &EmailRequest,
) -> Result<EmailAck, ProxyError> {
    request.validate().inspect_err(|e| {
        warn!(reason = %e, "rejected email request");
    })?;

    let api_key = require(&config.sendgrid.api_key, SENDGRID_API_KEY)?;
    let from_email = require(&config.sendgrid.from_email, SENDGRID_FROM_EMAIL)?;

    let email_html = render_reminder_html(&request.patient_name, &request.appointment_date)?;

    let body = json!({
        "personalizations": [{ "to": [{ "email": request.email }] }],
        "from": { "email": from_email, "name": config.sendgrid.from_name },
        "subject": SUBJECT,
        "content": [{ "type": "text/html", "value": email_html }],
    });

    let response = transport
        .send(VendorRequest {
            service: SERVICE,
            url: SENDGRID_SEND_URL.to_string(),
            auth: Auth::Bearer(api_key.clone()),
            body: RequestBody::Json(body),
        })
        .await?;

    if !response.is_success() {
        let err = response.into_error(SERVICE);
        error!(error = %err, detail = err.vendor_detail(), "sendgrid rejected email");
        return Err(err);
    }

    info!(status = response.status, "email sent");

    Ok(EmailAck {
        success: true,
        message: "Email sent successfully".to_string(),
        email: request.email.clone(),
        status_code: response.status,
        email_html,
    })
}
