use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use asthi_core::models::notification::{EmailRequest, NotificationRequest, SmsRequest};
use asthi_proxy::notify::{dispatch, NotificationAck};

use crate::error::{Channel, NotifyError};
use crate::state::AppState;

pub async fn send_sms_notification(
    State(state): State<AppState>,
    payload: Result<Json<SmsRequest>, JsonRejection>,
) -> Result<Json<NotificationAck>, NotifyError> {
    let Json(req) = payload.map_err(|e| NotifyError::body(Channel::Sms, e))?;
    let ack = dispatch(state.transport.as_ref(), &state.proxy, &NotificationRequest::Sms(req))
        .await
        .map_err(NotifyError::sms)?;
    Ok(Json(ack))
}

pub async fn send_email_notification(
    State(state): State<AppState>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<NotificationAck>, NotifyError> {
    let Json(req) = payload.map_err(|e| NotifyError::body(Channel::Email, e))?;
    let ack = dispatch(state.transport.as_ref(), &state.proxy, &NotificationRequest::Email(req))
        .await
        .map_err(NotifyError::email)?;
    Ok(Json(ack))
}
