use crate::{
    error::Error as SafeEnvError, network::EmailTransport, security::Session,
    server::app_state::AppState, users::SecretLookup,
};
use actix_web::{HttpResponse, web};
use serde_derive::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecretParams {
    pub new_key: Option<String>,
    pub new_value: Option<String>,
}

pub async fn secrets_update<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: Session,
    path: web::Path<String>,
    body_params: web::Json<UpdateSecretParams>,
) -> Result<HttpResponse, SafeEnvError> {
    let secret = state
        .api
        .secrets(session.user_id)
        .update_secret(
            &SecretLookup::Name(path.into_inner()),
            body_params.new_key.as_deref(),
            body_params.new_value.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(secret))
}
