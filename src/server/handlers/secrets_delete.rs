use crate::{
    error::Error as SafeEnvError, network::EmailTransport, security::Session,
    server::app_state::AppState,
};
use actix_web::{HttpResponse, web};
use uuid::Uuid;

pub async fn secrets_delete<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, SafeEnvError> {
    let secret = state
        .api
        .secrets(session.user_id)
        .delete_secret(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(secret))
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
        test::{TestRequest, call_service, init_service},
        web,
    };
    use lettre::transport::stub::AsyncStubTransport;

    #[actix_rt::test]
    async fn can_delete_only_own_secrets() -> anyhow::Result<()> {
        let state = web::Data::new(mock_app_state().await?);
        let (alice, alice_session) = mock_user_session(&state.api, "alice").await?;
        let (_, bob_session) = mock_user_session(&state.api, "bob").await?;
        let secret = state.api.secrets(alice.id).store_secret("API_KEY", "v").await?;
        let app = init_service(
            App::new()
                .app_data(state.clone())
                .app_data(web::Data::new(mock_session_keys()?))
                .configure(configure::<AsyncStubTransport>),
        )
        .await;

        let request = |token: &str| {
            TestRequest::delete()
                .uri(&format!("/api/v1/keys/{}", secret.id))
                .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
                .to_request()
        };

        let response = call_service(&app, request(&bob_session.token)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.api.secrets(alice.id).list_secrets().await?.len(), 1);

        let response = call_service(&app, request(&alice_session.token)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.api.secrets(alice.id).list_secrets().await?.is_empty());

        let response = call_service(&app, request(&alice_session.token)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}
