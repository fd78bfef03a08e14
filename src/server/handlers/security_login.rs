use crate::{
    error::Error as SafeEnvError, network::EmailTransport, server::app_state::AppState,
};
use actix_web::{HttpResponse, web};
use serde_derive::Deserialize;

#[derive(Deserialize)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
}

pub async fn security_login<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    body_params: web::Json<LoginParams>,
) -> Result<HttpResponse, SafeEnvError> {
    let session_token = state
        .api
        .security()
        .login(&body_params.email, &body_params.password)
        .await?;

    Ok(HttpResponse::Ok().json(session_token))
}
