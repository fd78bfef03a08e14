use crate::{
    error::Error as SafeEnvError, network::EmailTransport, server::app_state::AppState,
};
use actix_web::{HttpResponse, web};
use serde_derive::Deserialize;

#[derive(Deserialize)]
pub struct RegisterParams {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn security_register<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    body_params: web::Json<RegisterParams>,
) -> Result<HttpResponse, SafeEnvError> {
    let body_params = body_params.into_inner();
    let user = state
        .api
        .security()
        .register(&body_params.username, &body_params.email, &body_params.password)
        .await?;

    Ok(HttpResponse::Created().json(user))
}
