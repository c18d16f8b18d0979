use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::models::response::ApiResponse;
use crate::services::plan_service::PlanService;

/*
    GET /api/spot/list/{planId}
*/
pub async fn list_spots(data: web::Data<SqlitePool>, path: web::Path<i64>) -> impl Responder {
    let plan_id = path.into_inner();
    let service = PlanService::new(data.get_ref().clone());

    match service.spots_for_plan(plan_id).await {
        Ok(spots) => HttpResponse::Ok().json(ApiResponse::success(spots)),
        Err(err) => {
            log::error!("failed to list spots for plan {}: {}", plan_id, err);
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Failed to load spots"))
        }
    }
}
