use crate::{
    error::Error as SafeEnvError, network::EmailTransport, security::Session,
    server::app_state::AppState,
};
use actix_web::{HttpResponse, web};

pub async fn user_get<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: Session,
) -> Result<HttpResponse, SafeEnvError> {
    let user = state
        .api
        .users()
        .get(session.user_id)
        .await?
        .ok_or_else(SafeEnvError::unauthorized)?;

    Ok(HttpResponse::Ok().json(user))
}
