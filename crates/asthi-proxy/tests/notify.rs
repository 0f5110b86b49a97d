use serde_json::json;

use asthi_core::models::notification::{EmailRequest, NotificationRequest, SmsRequest};
use asthi_proxy::config::ProxyConfig;
use asthi_proxy::error::ProxyError;
use asthi_proxy::mock::MockTransport;
use asthi_proxy::notify::email::{render_reminder_html, send_email};
use asthi_proxy::notify::sms::send_sms;
use asthi_proxy::notify::{dispatch, NotificationAck};
use asthi_proxy::transport::{Auth, RequestBody};

fn config() -> ProxyConfig {
    ProxyConfig::from_lookup(|k| {
        let value = match k {
            "TWILIO_ACCOUNT_SID" => "AC0123456789",
            "TWILIO_AUTH_TOKEN" => "twilio-token-secret",
            "TWILIO_PHONE_NUMBER" => "+15005550006",
            "SENDGRID_API_KEY" => "SG.secret",
            "SENDGRID_FROM_EMAIL" => "care@asthi.example",
            _ => return None,
        };
        Some(value.to_string())
    })
}

fn sms_request(phone: &str) -> SmsRequest {
    SmsRequest {
        phone: phone.to_string(),
        patient_name: "Ravi Kumar".to_string(),
        appointment_date: "Friday, 14 March 2025".to_string(),
    }
}

fn email_request(email: &str) -> EmailRequest {
    EmailRequest {
        email: email.to_string(),
        patient_name: "Ravi Kumar".to_string(),
        appointment_date: "Friday, 14 March 2025".to_string(),
    }
}

#[tokio::test]
async fn sms_is_sent_to_normalized_number() {
    let transport = MockTransport::new().respond_json(201, json!({ "sid": "SM42", "status": "queued" }));

    let ack = send_sms(&transport, &config(), &sms_request("91 98765 43210"))
        .await
        .unwrap();

    assert!(ack.success);
    assert_eq!(ack.phone, "+919876543210");
    assert_eq!(ack.sid, "SM42");
    assert!(ack.message_body.contains("Dear Ravi Kumar,"));
    assert!(ack.message_body.contains("Friday, 14 March 2025 at 10:00 AM"));

    let request = &transport.requests()[0];
    assert!(request.url.ends_with("/Accounts/AC0123456789/Messages.json"));
    assert!(matches!(&request.auth, Auth::Basic { username, .. } if username == "AC0123456789"));
    let RequestBody::Form(fields) = &request.body else {
        panic!("expected form body");
    };
    assert!(fields.contains(&("To", "+919876543210".to_string())));
    assert!(fields.contains(&("From", "+15005550006".to_string())));
}

#[tokio::test]
async fn invalid_phone_is_rejected_before_dispatch() {
    let transport = MockTransport::new();
    let err = send_sms(&transport, &config(), &sms_request("12345"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProxyError::InvalidInput(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn sms_vendor_error_carries_vendor_message() {
    let transport = MockTransport::new().respond_json(
        400,
        json!({ "code": 21211, "message": "The 'To' number is not a valid phone number.", "status": 400 }),
    );
    let err = send_sms(&transport, &config(), &sms_request("+14155551234"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProxyError::Vendor { status: 400, .. }));
    assert_eq!(
        err.vendor_detail(),
        Some("The 'To' number is not a valid phone number.")
    );
}

#[tokio::test]
async fn sms_without_twilio_config_never_leaks_secrets() {
    let transport = MockTransport::new();
    let config = ProxyConfig::from_lookup(|k| {
        (k == "TWILIO_AUTH_TOKEN").then(|| "twilio-token-secret".to_string())
    });

    let err = send_sms(&transport, &config, &sms_request("+14155551234"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProxyError::Configuration("TWILIO_ACCOUNT_SID")));
    assert!(!format!("{err} {err:?}").contains("twilio-token-secret"));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn email_returns_rendered_preview() {
    let transport = MockTransport::new().respond(202, "");

    let ack = send_email(&transport, &config(), &email_request("ravi@example.com"))
        .await
        .unwrap();

    assert!(ack.success);
    assert_eq!(ack.status_code, 202);
    assert_eq!(ack.email, "ravi@example.com");
    assert!(ack.email_html.contains("Dear Ravi Kumar,"));

    let RequestBody::Json(body) = &transport.requests()[0].body else {
        panic!("expected JSON body");
    };
    assert_eq!(body["personalizations"][0]["to"][0]["email"], "ravi@example.com");
    assert_eq!(body["from"]["email"], "care@asthi.example");
    assert_eq!(body["from"]["name"], "Asthi Care");
    assert_eq!(body["content"][0]["value"], ack.email_html);
}

#[tokio::test]
async fn email_vendor_error_uses_sendgrid_error_list() {
    let transport = MockTransport::new().respond_json(
        403,
        json!({ "errors": [{ "message": "The from address does not match a verified Sender Identity." }] }),
    );
    let err = send_email(&transport, &config(), &email_request("ravi@example.com"))
        .await
        .unwrap_err();
    assert_eq!(
        err.vendor_detail(),
        Some("The from address does not match a verified Sender Identity.")
    );
}

#[tokio::test]
async fn invalid_email_is_rejected_before_dispatch() {
    let transport = MockTransport::new();
    let err = send_email(&transport, &config(), &email_request("not-an-email"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid email format");
    assert_eq!(transport.calls(), 0);
}

#[test]
fn reminder_html_escapes_patient_values() {
    let html = render_reminder_html("<script>alert(1)</script>", "Mon & Tue").unwrap();
    assert!(html.contains("&lt;script&gt;alert(1)"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("Mon &amp; Tue"));
    assert!(!html.contains("{{"));
}

#[test]
fn reminder_html_fills_both_placeholders() {
    let html = render_reminder_html("Ravi Kumar", "Friday, 14 March 2025").unwrap();
    assert!(html.contains("<p>Dear Ravi Kumar,</p>"));
    assert!(html.contains("<strong>Date:</strong> Friday, 14 March 2025"));
    assert!(html.contains("font-family: Arial"));
}

#[tokio::test]
async fn dispatch_routes_by_request_shape() {
    let transport = MockTransport::new()
        .respond_json(201, json!({ "sid": "SM1" }))
        .respond(202, "");

    let sms = dispatch(
        &transport,
        &config(),
        &NotificationRequest::Sms(sms_request("+14155551234")),
    )
    .await
    .unwrap();
    assert!(matches!(sms, NotificationAck::Sms(_)));

    let email = dispatch(
        &transport,
        &config(),
        &NotificationRequest::Email(email_request("ravi@example.com")),
    )
    .await
    .unwrap();
    assert!(matches!(email, NotificationAck::Email(_)));

    let services: Vec<_> = transport.requests().iter().map(|r| r.service).collect();
    assert_eq!(services, ["twilio", "sendgrid"]);
}
