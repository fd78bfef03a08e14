use crate::{
    network::{EmailTransport, EmailTransportError},
    server::app_state::AppState,
};
use actix_web::{HttpResponse, Responder, web};
use serde_derive::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct ForgotPasswordParams {
    pub email: String,
}

/// Always responds with `200` so that registered emails can't be enumerated.
pub async fn security_password_forgot<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    body_params: web::Json<ForgotPasswordParams>,
) -> impl Responder
where
    ET::Error: EmailTransportError,
{
    state
        .api
        .security()
        .request_password_reset(&body_params.email)
        .await;

    HttpResponse::Ok().json(json!({
        "message": "If the email is registered, a password reset link has been sent."
    }))
}
