mod app_state;
mod extractors;
mod handlers;

use crate::{
    api::Api,
    config::Config,
    database::Database,
    error::Error as SafeEnvError,
    network::{EmailTransport, EmailTransportError, smtp_transport},
    security::SessionKeys,
    users::SecretsEncryption,
};
use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use anyhow::{Context, anyhow};
use lettre::{AsyncSmtpTransport, Tokio1Executor};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

pub use self::app_state::AppState;

/// CORS preflight responses are cached for 12 hours.
const CORS_MAX_AGE_SECS: usize = 12 * 60 * 60;

#[actix_rt::main]
pub async fn run(config: Config, http_port: u16) -> Result<(), anyhow::Error> {
    // Refuse to start with keys that can't sign sessions or decrypt secrets.
    let session_keys =
        SessionKeys::new(&config.security).with_context(|| "Invalid security configuration.")?;
    SecretsEncryption::new(
        config
            .security
            .secrets_encryption_key
            .as_deref()
            .ok_or_else(|| anyhow!("Secrets encryption key is not configured."))?,
    )
    .with_context(|| "Invalid security configuration.")?;

    let db = Database::open_path(&config.db.path)
        .await
        .with_context(|| format!("Failed to open database at {}.", config.db.path))?;

    let email_transport = if let Some(ref smtp_config) = config.smtp {
        smtp_transport(smtp_config)?
    } else {
        warn!("SMTP is not configured, password reset emails won't be delivered.");
        AsyncSmtpTransport::<Tokio1Executor>::unencrypted_localhost()
    };

    let allowed_origin = config.public_url.origin().ascii_serialization();
    let state = web::Data::new(AppState::new(Api::new(config, db, email_transport)));
    let session_keys = web::Data::new(session_keys);

    let http_server_url = format!("0.0.0.0:{http_port}");
    let http_server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(CORS_MAX_AGE_SECS);

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .app_data(session_keys.clone())
            .configure(configure::<AsyncSmtpTransport<Tokio1Executor>>)
    });

    let http_server = http_server
        .bind(&http_server_url)
        .with_context(|| format!("Failed to bind to {}.", &http_server_url))?;

    info!("SafeEnv API server is available at http://{http_server_url}");

    http_server
        .run()
        .await
        .with_context(|| "Failed to run SafeEnv API server.")
}

/// Mounts SafeEnv routes. Expects `AppState<ET>` and `SessionKeys` to be registered as app data.
pub fn configure<ET: EmailTransport>(cfg: &mut web::ServiceConfig)
where
    ET::Error: EmailTransportError,
{
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        SafeEnvError::invalid_input(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _| {
        SafeEnvError::invalid_input(err.to_string()).into()
    }))
    .route("/", web::get().to(handlers::welcome))
    .service(
        web::scope("/api/v1")
            .route("/register", web::post().to(handlers::security_register::<ET>))
            .route("/login", web::post().to(handlers::security_login::<ET>))
            .route(
                "/forgot-password",
                web::post().to(handlers::security_password_forgot::<ET>),
            )
            .route(
                "/reset-password",
                web::post().to(handlers::security_password_reset::<ET>),
            )
            .route("/user", web::get().to(handlers::user_get::<ET>))
            .route("/keys", web::get().to(handlers::secrets_list::<ET>))
            .route("/keys/{name}", web::put().to(handlers::secrets_update::<ET>))
            .route("/keys/{id}", web::delete().to(handlers::secrets_delete::<ET>))
            .route("/store", web::post().to(handlers::secrets_store::<ET>))
            .route("/store/bulk", web::post().to(handlers::secrets_import::<ET>))
            .route("/retrieve/{id}", web::get().to(handlers::secrets_retrieve::<ET>))
            .route("/share", web::post().to(handlers::shares_create::<ET>))
            .route(
                "/share/retrieve/{token}",
                web::get().to(handlers::shares_resolve::<ET>),
            ),
    );
}
