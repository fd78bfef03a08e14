use crate::{
    error::Error as SafeEnvError,
    network::EmailTransport,
    security::Session,
    server::app_state::AppState,
    users::parse_bulk_text,
};
use actix_web::{HttpResponse, web};
use serde_derive::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
pub struct ImportSecretsParams {
    /// Free-form `NAME=value` lines.
    pub text: Option<String>,
    /// Already parsed name/value pairs, take precedence over the entries parsed from `text`.
    pub variables: Option<BTreeMap<String, String>>,
}

pub async fn secrets_import<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: Session,
    body_params: web::Json<ImportSecretsParams>,
) -> Result<HttpResponse, SafeEnvError> {
    let ImportSecretsParams { text, variables } = body_params.into_inner();
    if text.is_none() && variables.is_none() {
        return Err(SafeEnvError::invalid_input(
            "Either text or variables are required.",
        ));
    }

    let mut secrets = text.as_deref().map(parse_bulk_text).unwrap_or_default();
    secrets.extend(variables.unwrap_or_default());

    let summary = state
        .api
        .secrets(session.user_id)
        .import_secrets(secrets)
        .await?;

    Ok(HttpResponse::Ok().json(summary))
}
