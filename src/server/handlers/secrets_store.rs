use crate::{
    error::Error as SafeEnvError, network::EmailTransport, security::Session,
    server::app_state::AppState,
};
use actix_web::{HttpResponse, web};
use serde_derive::Deserialize;

#[derive(Deserialize)]
pub struct StoreSecretParams {
    pub key: String,
    pub value: String,
}

pub async fn secrets_store<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: Session,
    body_params: web::Json<StoreSecretParams>,
) -> Result<HttpResponse, SafeEnvError> {
    let secret = state
        .api
        .secrets(session.user_id)
        .store_secret(&body_params.key, &body_params.value)
        .await?;

    Ok(HttpResponse::Created().json(secret))
}

#[cfg(test)]
mod tests {
    use crate::{
        server::configure,
        tests::{mock_app_state, mock_session_keys, mock_user_session},
    };
    use actix_web::{
        App,
        http::{StatusCode, header},
        test::{TestRequest, call_service, init_service, read_body_json},
        web,
    };
    use lettre::transport::stub::AsyncStubTransport;
    use serde_json::{Value, json};

    #[actix_rt::test]
    async fn can_store_secret_once() -> anyhow::Result<()> {
        let state = web::Data::new(mock_app_state().await?);
        let (user, session_token) = mock_user_session(&state.api, "alice").await?;
        let app = init_service(
            App::new()
                .app_data(state.clone())
                .app_data(web::Data::new(mock_session_keys()?))
                .configure(configure::<AsyncStubTransport>),
        )
        .await;

        let request = |body: Value| {
            TestRequest::post()
                .uri("/api/v1/store")
                .insert_header((
                    header::AUTHORIZATION,
                    format!("Bearer {}", session_token.token),
                ))
                .set_json(body)
                .to_request()
        };

        let response = call_service(&app, request(json!({ "key": "API_KEY", "value": "a=b" }))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = read_body_json(response).await;
        assert_eq!(body["name"], "API_KEY");
        assert!(body.get("value").is_none());

        let response = call_service(&app, request(json!({ "key": "API_KEY", "value": "c" }))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = read_body_json(response).await;
        assert_eq!(
            body,
            json!({ "message": "Secret with name 'API_KEY' already exists." })
        );

        let response = call_service(&app, request(json!({ "key": "bad name", "value": "c" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = call_service(&app, request(json!({ "key": "NO_VALUE" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert_eq!(state.api.secrets(user.id).list_secrets().await?.len(), 1);

        Ok(())
    }
}
