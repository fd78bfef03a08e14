use crate::{
    error::Error as SafeEnvError, network::EmailTransport, security::Session,
    server::app_state::AppState,
};
use actix_web::{HttpResponse, web};
use serde_derive::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CreateShareParams {
    /// ID of the secret to share.
    pub id: Uuid,
}

pub async fn shares_create<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: Session,
    body_params: web::Json<CreateShareParams>,
) -> Result<HttpResponse, SafeEnvError> {
    let shared_link = state
        .api
        .shares()
        .create_share(session.user_id, body_params.id)
        .await?;

    Ok(HttpResponse::Ok().json(shared_link))
}
