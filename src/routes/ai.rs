use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;

use crate::models::response::ApiResponse;
use crate::services::ai_service::AiService;

/*
    POST /api/ai/generate
*/
pub async fn generate_plan(payload: web::Json<Value>) -> impl Responder {
    let service = match AiService::from_env() {
        Ok(service) => service,
        Err(err) => {
            log::error!("AI planner unavailable: {}", err);
            return HttpResponse::Ok().json(ApiResponse::<Value>::error("AI planner unavailable"));
        }
    };

    match service.generate_plan(&payload).await {
        Ok(plan) => HttpResponse::Ok().json(ApiResponse::success(plan)),
        Err(err) => {
            log::error!("itinerary generation failed: {}", err);
            HttpResponse::Ok()
                .json(ApiResponse::<Value>::error(format!("Failed to generate plan: {}", err)))
        }
    }
}

/*
    POST /api/ai/budget/analyze
*/
pub async fn analyze_budget(payload: web::Json<Value>) -> impl Responder {
    let service = match AiService::from_env() {
        Ok(service) => service,
        Err(err) => {
            log::error!("AI budget advisor unavailable: {}", err);
            return HttpResponse::Ok()
                .json(ApiResponse::<Value>::error("AI budget advisor unavailable"));
        }
    };

    match service.analyze_budget(&payload).await {
        Ok(analysis) => HttpResponse::Ok().json(ApiResponse::success(analysis)),
        Err(err) => {
            log::error!("budget analysis failed: {}", err);
            HttpResponse::Ok()
                .json(ApiResponse::<Value>::error(format!("Failed to analyze budget: {}", err)))
        }
    }
}
