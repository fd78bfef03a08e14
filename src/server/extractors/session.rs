use crate::{
    error::Error as SafeEnvError,
    security::{Session, SessionKeys},
};
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::{future::Future, pin::Pin};
use tracing::debug;

/// Extracts the caller identity from the `Authorization: Bearer <token>` header. Requests without
/// a valid session token are rejected with `401` before they reach the handler.
impl FromRequest for Session {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let session_keys = web::Data::<SessionKeys>::extract(&req).await?;
            let Some(bearer_auth) = Option::<BearerAuth>::extract(&req).await? else {
                debug!(request.path = req.path(), "Session token is missing.");
                return Err(Error::from(SafeEnvError::unauthorized()));
            };

            session_keys
                .verify(bearer_auth.token())
                .map_err(|err| Error::from(SafeEnvError::from(err)))
        })
    }
}
