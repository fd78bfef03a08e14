use crate::{
    error::Error as SafeEnvError, network::EmailTransport, security::Session,
    server::app_state::AppState,
};
use actix_web::{HttpResponse, web};
use serde_json::json;

pub async fn secrets_list<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: Session,
) -> Result<HttpResponse, SafeEnvError> {
    let secrets = state.api.secrets(session.user_id).list_secrets().await?;
    Ok(HttpResponse::Ok().json(json!({ "keys": secrets })))
}
