use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::models::response::ApiResponse;
use crate::models::user::{RegisterRequest, SavePreferencesRequest};
use crate::services::user_service::UserService;

#[derive(serde::Deserialize)]
pub struct LoginParams {
    username: String,
    password: String,
}

#[derive(serde::Deserialize)]
pub struct PreferenceParams {
    #[serde(rename = "userId")]
    user_id: i64,
}

/*
    POST /api/user/register
*/
pub async fn register(
    data: web::Data<SqlitePool>,
    input: web::Json<RegisterRequest>,
) -> impl Responder {
    if let Some(email) = input.email.as_deref() {
        if !email.is_empty() && !is_valid_email(email) {
            return HttpResponse::Ok().json(ApiResponse::<Value>::error("Invalid email address"));
        }
    }

    let service = UserService::new(data.get_ref().clone());
    match service.register(&input).await {
        Ok(true) => HttpResponse::Ok().json(ApiResponse::success("Registered successfully")),
        Ok(false) => HttpResponse::Ok().json(ApiResponse::<Value>::error("Username already exists")),
        Err(err) => {
            log::error!("registration failed for {}: {}", input.username, err);
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Registration failed"))
        }
    }
}

/*
    POST /api/user/login?username={username}&password={password}
*/
pub async fn login(data: web::Data<SqlitePool>, params: web::Query<LoginParams>) -> impl Responder {
    let service = UserService::new(data.get_ref().clone());

    match service.login(&params.username, &params.password).await {
        Ok(Some(user)) => HttpResponse::Ok().json(ApiResponse::success(user)),
        Ok(None) => {
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Invalid username or password"))
        }
        Err(err) => {
            log::error!("login failed for {}: {}", params.username, err);
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Login failed"))
        }
    }
}

/*
    GET /api/user/preference?userId={userId}
*/
pub async fn get_preferences(
    data: web::Data<SqlitePool>,
    params: web::Query<PreferenceParams>,
) -> impl Responder {
    let service = UserService::new(data.get_ref().clone());

    match service.preferences(params.user_id).await {
        Ok(profile) => HttpResponse::Ok().json(ApiResponse::success(profile)),
        Err(err) => {
            log::error!("failed to load preferences for user {}: {}", params.user_id, err);
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Failed to load preferences"))
        }
    }
}

/*
    POST /api/user/preferences/save
*/
pub async fn save_preferences(
    data: web::Data<SqlitePool>,
    input: web::Json<SavePreferencesRequest>,
) -> impl Responder {
    let service = UserService::new(data.get_ref().clone());

    match service
        .save_preferences(input.user_id, &input.preferences, input.travel_style.as_deref())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Preferences saved")),
        Err(err) => {
            log::error!("failed to save preferences for user {}: {}", input.user_id, err);
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Failed to save preferences"))
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    )
    .map(|re| re.is_match(email))
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("traveler@example.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@domain@twice.com"));
        assert!(!is_valid_email("@nowhere.com"));
    }
}
