use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use asthi_api::app;
use asthi_api::middleware::audit::REQUEST_ID_HEADER;
use asthi_api::state::AppState;
use asthi_proxy::config::ProxyConfig;
use asthi_proxy::mock::MockTransport;

const AI_KEY: &str = "gateway-secret-1";
const SPEECH_KEY: &str = "speech-secret-2";

fn full_config() -> ProxyConfig {
    ProxyConfig::from_lookup(|k| {
        let value = match k {
            "LOVABLE_API_KEY" => AI_KEY,
            "ELEVENLABS_API_KEY" => SPEECH_KEY,
            "TWILIO_ACCOUNT_SID" => "AC1",
            "TWILIO_AUTH_TOKEN" => "twilio-secret-3",
            "TWILIO_PHONE_NUMBER" => "+15005550006",
            "SENDGRID_API_KEY" => "sendgrid-secret-4",
            "SENDGRID_FROM_EMAIL" => "care@asthi.example",
            _ => return None,
        };
        Some(value.to_string())
    })
}

fn router(transport: Arc<MockTransport>, config: ProxyConfig) -> Router {
    app(AppState::new(transport, config))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_lists_unconfigured_services_by_name_only() {
    let app = router(Arc::new(MockTransport::new()), ProxyConfig::default());
    let req = Request::builder().uri("/api/health").body(Body::empty()).unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["unconfigured"]
        .as_array()
        .unwrap()
        .contains(&json!("LOVABLE_API_KEY")));
}

#[tokio::test]
async fn assessment_returns_tier_scores_and_bundle() {
    let app = router(Arc::new(MockTransport::new()), ProxyConfig::default());
    let (status, body) = send(
        app,
        post(
            "/api/assessment",
            json!({ "grip_strength": 25.5, "walking_speed": 0.85, "muscle_mass": 6, "language": "en" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], 2);
    assert_eq!(body["scores"]["total"], 7);
    assert_eq!(body["bundle"]["title"], "Phase 2 - Moderate Concern");
    assert_eq!(body["bundle"]["videos"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn assessment_treats_missing_measurements_as_zero() {
    let app = router(Arc::new(MockTransport::new()), ProxyConfig::default());
    let (status, body) = send(app, post("/api/assessment", json!({ "language": "hi" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], 1);
    assert_eq!(body["language"], "hi");
}

#[tokio::test]
async fn tier_bundle_lookup() {
    let app = router(Arc::new(MockTransport::new()), ProxyConfig::default());
    let req = Request::builder()
        .uri("/api/tiers/3?language=hi")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "चरण 3 - अच्छी स्थिति");

    let req = Request::builder().uri("/api/tiers/4").body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("unknown risk phase"));
}

#[tokio::test]
async fn assessment_treats_null_measurements_as_zero() {
    let app = router(Arc::new(MockTransport::new()), ProxyConfig::default());
    let (status, body) = send(
        app,
        post(
            "/api/assessment",
            json!({ "grip_strength": null, "walking_speed": 0.9, "muscle_mass": 8 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scores"]["grip_strength"], 1);
    assert_eq!(body["scores"]["total"], 7);
    assert_eq!(body["tier"], 2);
}

#[tokio::test]
async fn tier_outside_known_phases_is_404_json() {
    let app = router(Arc::new(MockTransport::new()), ProxyConfig::default());

    for phase in ["0", "256", "-1", "abc"] {
        let req = Request::builder()
            .uri(format!("/api/tiers/{phase}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app.clone(), req).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "phase {phase}");
        assert_eq!(
            body["error"],
            format!("unknown risk phase: {phase} (expected 1, 2 or 3)")
        );
    }
}

#[tokio::test]
async fn chat_success() {
    let transport = Arc::new(
        MockTransport::new()
            .respond_json(200, json!({ "choices": [{ "message": { "content": "Try walking." } }] })),
    );
    let app = router(transport.clone(), full_config());

    let (status, body) = send(
        app,
        post(
            "/api/chat",
            json!({ "messages": [{ "role": "user", "content": "Exercise tips?" }], "language": "en" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": "Try walking." }));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn chat_rate_limit_maps_to_429() {
    let transport = Arc::new(MockTransport::new().respond(429, "{}"));
    let app = router(transport, full_config());

    let (status, body) = send(
        app,
        post("/api/chat", json!({ "messages": [{ "role": "user", "content": "hi" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Rate limit exceeded");
}

#[tokio::test]
async fn chat_vendor_failure_maps_to_500() {
    let transport = Arc::new(MockTransport::new().respond(503, "unavailable"));
    let app = router(transport, full_config());

    let (status, body) = send(
        app,
        post("/api/chat", json!({ "messages": [{ "role": "user", "content": "hi" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn missing_credentials_never_appear_in_responses() {
    let transport = Arc::new(MockTransport::new());
    let config = ProxyConfig::from_lookup(|k| (k == "LOVABLE_API_KEY").then(|| AI_KEY.to_string()));
    let app = router(transport.clone(), config);

    let (status, body) = send(app, post("/api/text-to-speech", json!({ "text": "hello" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "ELEVENLABS_API_KEY is not configured");
    assert!(!body.to_string().contains(AI_KEY));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn text_to_speech_round_trip() {
    let transport = Arc::new(MockTransport::new().respond(200, vec![1u8, 2, 3]));
    let app = router(transport, full_config());

    let (status, body) = send(app, post("/api/text-to-speech", json!({ "text": "Namaste" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["audioContent"], STANDARD.encode([1u8, 2, 3]));
}

#[tokio::test]
async fn empty_text_to_speech_fails_without_vendor_call() {
    let transport = Arc::new(MockTransport::new());
    let app = router(transport.clone(), full_config());

    let (status, body) = send(app, post("/api/text-to-speech", json!({ "text": "" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn speech_to_text_returns_text() {
    let transport = Arc::new(MockTransport::new().respond_json(200, json!({ "text": "knee pain" })));
    let app = router(transport, full_config());

    let (status, body) = send(
        app,
        post(
            "/api/speech-to-text",
            json!({ "audio": STANDARD.encode(b"webm"), "language": "en" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "text": "knee pain" }));
}

#[tokio::test]
async fn malformed_ai_body_is_a_400_with_error_field() {
    let app = router(Arc::new(MockTransport::new()), full_config());
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn send_sms_success_and_invalid_phone() {
    let transport = Arc::new(MockTransport::new().respond_json(201, json!({ "sid": "SM9" })));
    let app = router(transport.clone(), full_config());

    let (status, body) = send(
        app.clone(),
        post(
            "/api/send-sms",
            json!({ "phone": "919876543210", "patient_name": "Meera", "appointment_date": "June 2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["phone"], "+919876543210");
    assert_eq!(body["sid"], "SM9");

    let (status, body) = send(
        app,
        post(
            "/api/send-sms",
            json!({ "phone": "123", "patient_name": "Meera", "appointment_date": "June 2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("international format"));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn send_sms_vendor_rejection_passes_detail_through() {
    let transport = Arc::new(
        MockTransport::new().respond_json(400, json!({ "message": "Number is unverified" })),
    );
    let app = router(transport, full_config());

    let (status, body) = send(
        app,
        post(
            "/api/send-sms",
            json!({ "phone": "+14155551234", "patient_name": "Meera", "appointment_date": "June 2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Number is unverified");
}

#[tokio::test]
async fn send_email_without_config_is_500_with_generic_detail() {
    let transport = Arc::new(MockTransport::new());
    let app = router(transport.clone(), ProxyConfig::default());

    let (status, body) = send(
        app,
        post(
            "/api/send-email",
            json!({ "email": "meera@example.com", "patient_name": "Meera", "appointment_date": "June 2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Email service configuration error");
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn send_email_returns_html_preview() {
    let transport = Arc::new(MockTransport::new().respond(202, ""));
    let app = router(transport, full_config());

    let (status, body) = send(
        app,
        post(
            "/api/send-email",
            json!({ "email": "meera@example.com", "patient_name": "Meera", "appointment_date": "June 2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status_code"], 202);
    assert!(body["email_html"].as_str().unwrap().contains("Dear Meera,"));
}

#[tokio::test]
async fn notification_body_missing_fields_is_422() {
    let app = router(Arc::new(MockTransport::new()), full_config());
    let (status, body) = send(app, post("/api/send-email", json!({ "email": "a@b.co" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn concurrent_requests_each_get_one_vendor_call() {
    let transport = Arc::new(MockTransport::new().respond(200, vec![7u8]).respond(200, vec![7u8]));
    let app = router(transport.clone(), full_config());

    let first = send(app.clone(), post("/api/text-to-speech", json!({ "text": "one" })));
    let second = send(app, post("/api/text-to-speech", json!({ "text": "two" })));
    let ((first_status, first_body), (second_status, second_body)) = tokio::join!(first, second);

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first_body, second_body);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn speech_rate_limits_map_to_429() {
    let transport = Arc::new(MockTransport::new().respond(429, "{}").respond(429, "{}"));
    let app = router(transport.clone(), full_config());

    let (status, body) = send(
        app.clone(),
        post("/api/speech-to-text", json!({ "audio": STANDARD.encode(b"webm") })),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Rate limit exceeded");

    let (status, body) = send(app, post("/api/text-to-speech", json!({ "text": "hello" }))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Rate limit exceeded");
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn notification_rate_limits_map_to_429_detail() {
    let transport = Arc::new(MockTransport::new().respond(429, "{}").respond(429, "{}"));
    let app = router(transport, full_config());

    let (status, body) = send(
        app.clone(),
        post(
            "/api/send-sms",
            json!({ "phone": "+14155551234", "patient_name": "Meera", "appointment_date": "June 2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["detail"], "Rate limit exceeded");

    let (status, body) = send(
        app,
        post(
            "/api/send-email",
            json!({ "email": "meera@example.com", "patient_name": "Meera", "appointment_date": "June 2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["detail"], "Rate limit exceeded");
}

#[tokio::test]
async fn notification_transport_failures_are_generic_500s() {
    let transport = Arc::new(
        MockTransport::new()
            .fail("connection reset")
            .fail("connection reset"),
    );
    let app = router(transport, full_config());

    let (status, body) = send(
        app.clone(),
        post(
            "/api/send-sms",
            json!({ "phone": "+14155551234", "patient_name": "Meera", "appointment_date": "June 2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Failed to send SMS. Please try again.");

    let (status, body) = send(
        app,
        post(
            "/api/send-email",
            json!({ "email": "meera@example.com", "patient_name": "Meera", "appointment_date": "June 2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Failed to send email. Please try again.");
}
