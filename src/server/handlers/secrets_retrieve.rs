use crate::{
    error::Error as SafeEnvError, network::EmailTransport, security::Session,
    server::app_state::AppState,
};
use actix_web::{HttpResponse, web};
use uuid::Uuid;

pub async fn secrets_retrieve<ET: EmailTransport>(
    state: web::Data<AppState<ET>>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, SafeEnvError> {
    let secret = state
        .api
        .secrets(session.user_id)
        .retrieve_secret(path.into_inner())
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
    use uuid::Uuid;

    #[actix_rt::test]
    async fn can_retrieve_secret() -> anyhow::Result<()> {
        let state = web::Data::new(mock_app_state().await?);
        let (alice, alice_session) = mock_user_session(&state.api, "alice").await?;
        let (_, bob_session) = mock_user_session(&state.api, "bob").await?;
        let secret = state
            .api
            .secrets(alice.id)
            .store_secret("DATABASE_URL", "postgres://u:p@h/db?x=y")
            .await?;
        let app = init_service(
            App::new()
                .app_data(state.clone())
                .app_data(web::Data::new(mock_session_keys()?))
                .configure(configure::<AsyncStubTransport>),
        )
        .await;

        let request = |id: String, token: &str| {
            TestRequest::get()
                .uri(&format!("/api/v1/retrieve/{id}"))
                .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
                .to_request()
        };

        let response = call_service(&app, request(secret.id.to_string(), &alice_session.token)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = read_body_json(response).await;
        assert_eq!(
            body,
            json!({ "name": "DATABASE_URL", "value": "postgres://u:p@h/db?x=y" })
        );

        // Foreign and absent secrets look the same.
        for (id, token) in [
            (secret.id.to_string(), &bob_session.token),
            (Uuid::now_v7().to_string(), &alice_session.token),
        ] {
            let response = call_service(&app, request(id, token)).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body: Value = read_body_json(response).await;
            assert_eq!(body, json!({ "message": "Not Found" }));
        }

        let response = call_service(&app, request("not-a-uuid".to_string(), &alice_session.token)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[actix_rt::test]
    async fn hides_details_of_corrupt_secrets() -> anyhow::Result<()> {
        let state = web::Data::new(mock_app_state().await?);
        let (alice, alice_session) = mock_user_session(&state.api, "alice").await?;
        let secret = state.api.secrets(alice.id).store_secret("TOKEN", "v").await?;
        sqlx::query("UPDATE user_secrets SET value = ?1 WHERE id = ?2")
            .bind(vec![1u8; 48])
            .bind(secret.id.hyphenated())
            .execute(&state.api.db.pool)
            .await?;
        let app = init_service(
            App::new()
                .app_data(state.clone())
                .app_data(web::Data::new(mock_session_keys()?))
                .configure(configure::<AsyncStubTransport>),
        )
        .await;

        let response = call_service(
            &app,
            TestRequest::get()
                .uri(&format!("/api/v1/retrieve/{}", secret.id))
                .insert_header((
                    header::AUTHORIZATION,
                    format!("Bearer {}", alice_session.token),
                ))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = read_body_json(response).await;
        assert_eq!(body, json!({ "message": "Internal Server Error" }));

        Ok(())
    }
}
