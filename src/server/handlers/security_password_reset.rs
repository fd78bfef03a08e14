use crate::{
    error::Error as SafeEnvError, network::EmailTransport, security::PasswordResetToken,
    server::app_state::AppState,
};
use actix_web::{HttpResponse, web};
use serde_derive::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordParams {
    pub token: PasswordResetToken,
    pub new_password: String,
}

pub async fn security_password_reset<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    body_params: web::Json<ResetPasswordParams>,
) -> Result<HttpResponse, SafeEnvError> {
    state
        .api
        .security()
        .reset_password(&body_params.token, &body_params.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Password has been reset." })))
}
