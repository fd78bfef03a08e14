use crate::{
    error::Error as SafeEnvError, network::EmailTransport, security::Session,
    server::app_state::AppState, users::ShareToken,
};
use actix_web::{HttpResponse, web};

pub async fn shares_resolve<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, SafeEnvError> {
    let secret = state
        .api
        .shares()
        .resolve_share(&ShareToken::from(path.into_inner()), session.user_id)
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
        test::{TestRequest, call_service, init_service, read_body_json},
        web,
    };
    use lettre::transport::stub::AsyncStubTransport;
    use serde_json::{Value, json};

    #[actix_rt::test]
    async fn can_share_and_resolve_secret() -> anyhow::Result<()> {
        let state = web::Data::new(mock_app_state().await?);
        let (alice, alice_session) = mock_user_session(&state.api, "alice").await?;
        let (_, bob_session) = mock_user_session(&state.api, "bob").await?;
        let secret = state.api.secrets(alice.id).store_secret("API_KEY", "v1").await?;
        let app = init_service(
            App::new()
                .app_data(state.clone())
                .app_data(web::Data::new(mock_session_keys()?))
                .configure(configure::<AsyncStubTransport>),
        )
        .await;

        // Only the owner can share.
        let share_request = |token: &str| {
            TestRequest::post()
                .uri("/api/v1/share")
                .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
                .set_json(json!({ "id": secret.id }))
                .to_request()
        };
        let response = call_service(&app, share_request(&bob_session.token)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = call_service(&app, share_request(&alice_session.token)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = read_body_json(response).await;
        let share_token = body["token"].as_str().unwrap_or_default().to_string();
        assert_eq!(share_token.len(), 64);
        assert_eq!(
            body["link"],
            format!("https://safeenv.dev/share/retrieve/{share_token}")
        );

        let resolve_request = |token: Option<&str>| {
            let request =
                TestRequest::get().uri(&format!("/api/v1/share/retrieve/{share_token}"));
            match token {
                Some(token) => request
                    .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
                    .to_request(),
                None => request.to_request(),
            }
        };

        let response = call_service(&app, resolve_request(None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Edits are visible through the link.
        state
            .api
            .secrets(alice.id)
            .update_secret(&secret.id.into(), None, Some("v2"))
            .await?;
        let response = call_service(&app, resolve_request(Some(&bob_session.token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = read_body_json(response).await;
        assert_eq!(body, json!({ "name": "API_KEY", "value": "v2" }));

        // Deletion invalidates the link.
        state.api.secrets(alice.id).delete_secret(secret.id).await?;
        let response = call_service(&app, resolve_request(Some(&bob_session.token))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}
