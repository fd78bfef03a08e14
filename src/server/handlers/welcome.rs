use actix_web::{HttpResponse, Responder};
use serde_json::json;

pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Welcome to SafeEnv API" }))
}
