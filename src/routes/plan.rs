use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Map, Value};
use sqlx::SqlitePool;

use crate::models::response::ApiResponse;
use crate::services::normalizer;
use crate::services::plan_service::PlanService;

#[derive(serde::Deserialize)]
pub struct SaveParams {
    #[serde(rename = "userId")]
    user_id: i64,
}

#[derive(serde::Deserialize)]
pub struct SearchParams {
    #[serde(rename = "userId")]
    user_id: i64,
    #[serde(rename = "planName")]
    plan_name: Option<String>,
    preferences: Option<String>,
    #[serde(rename = "budgetMin")]
    budget_min: Option<f64>,
    #[serde(rename = "budgetMax")]
    budget_max: Option<f64>,
}

/*
    POST /api/plan/save?userId={userId}
*/
pub async fn save_plan(
    data: web::Data<SqlitePool>,
    params: web::Query<SaveParams>,
    payload: web::Json<Map<String, Value>>,
) -> impl Responder {
    let normalized = normalizer::normalize(&payload);
    for issue in &normalized.issues {
        log::warn!("plan save for user {}: skipped field {}", params.user_id, issue);
    }

    let service = PlanService::new(data.get_ref().clone());
    match service.save_plan(params.user_id, &normalized.request).await {
        Ok(saved) => HttpResponse::Ok().json(ApiResponse::success_with_msg(
            json!({ "planId": saved.plan_id() }),
            "Plan saved successfully",
        )),
        Err(err) => {
            log::error!("failed to save plan for user {}: {}", params.user_id, err);
            HttpResponse::Ok()
                .json(ApiResponse::<Value>::error(format!("Failed to save plan: {}", err)))
        }
    }
}

/*
    GET /api/plan/list/{userId}
*/
pub async fn list_plans(data: web::Data<SqlitePool>, path: web::Path<i64>) -> impl Responder {
    let user_id = path.into_inner();
    let service = PlanService::new(data.get_ref().clone());

    match service.list_plans(user_id).await {
        Ok(plans) => HttpResponse::Ok().json(ApiResponse::success(plans)),
        Err(err) => {
            log::error!("failed to list plans for user {}: {}", user_id, err);
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Failed to load plans"))
        }
    }
}

/*
    GET /api/plan/search?userId={userId}&planName=&preferences=&budgetMin=&budgetMax=
*/
pub async fn search_plans(
    data: web::Data<SqlitePool>,
    params: web::Query<SearchParams>,
) -> impl Responder {
    let service = PlanService::new(data.get_ref().clone());

    match service
        .search_plans(
            params.user_id,
            params.plan_name.as_deref(),
            params.preferences.as_deref(),
            params.budget_min,
            params.budget_max,
        )
        .await
    {
        Ok(plans) => HttpResponse::Ok().json(ApiResponse::success(plans)),
        Err(err) => {
            log::error!("plan search failed for user {}: {}", params.user_id, err);
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Failed to search plans"))
        }
    }
}

/*
    DELETE /api/plan/delete/{planId}
*/
pub async fn delete_plan(data: web::Data<SqlitePool>, path: web::Path<i64>) -> impl Responder {
    let plan_id = path.into_inner();
    let service = PlanService::new(data.get_ref().clone());

    match service.delete_plan(plan_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Deleted successfully")),
        Err(err) => {
            log::error!("failed to delete plan {}: {}", plan_id, err);
            HttpResponse::Ok()
                .json(ApiResponse::<Value>::error(format!("Failed to delete plan: {}", err)))
        }
    }
}
