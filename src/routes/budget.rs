use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::models::budget::Budget;
use crate::models::response::ApiResponse;
use crate::services::budget_service::BudgetService;

/*
    POST /api/budget/add
*/
pub async fn add_budget(data: web::Data<SqlitePool>, entry: web::Json<Budget>) -> impl Responder {
    let service = BudgetService::new(data.get_ref().clone());

    match service.add_entry(&entry).await {
        Ok(true) => HttpResponse::Ok().json(ApiResponse::success("Budget entry added")),
        Ok(false) => {
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Failed to add budget entry"))
        }
        Err(err) => {
            log::error!("failed to add budget entry for plan {}: {}", entry.plan_id, err);
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Failed to add budget entry"))
        }
    }
}

/*
    GET /api/budget/list/{planId}
*/
pub async fn list_budget(data: web::Data<SqlitePool>, path: web::Path<i64>) -> impl Responder {
    let plan_id = path.into_inner();
    let service = BudgetService::new(data.get_ref().clone());

    match service.entries_for_plan(plan_id).await {
        Ok(entries) => HttpResponse::Ok().json(ApiResponse::success(entries)),
        Err(err) => {
            log::error!("failed to list budget entries for plan {}: {}", plan_id, err);
            HttpResponse::Ok().json(ApiResponse::<Value>::error("Failed to load budget entries"))
        }
    }
}

/*
    DELETE /api/budget/delete/{id}
*/
pub async fn delete_budget(data: web::Data<SqlitePool>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    let service = BudgetService::new(data.get_ref().clone());

    match service.delete_entry(id).await {
        Ok(true) => HttpResponse::Ok().json(ApiResponse::ok()),
        Ok(false) => HttpResponse::Ok()
            .json(ApiResponse::<Value>::error("Failed to delete budget entry, please retry")),
        Err(err) => {
            log::error!("failed to delete budget entry {}: {}", id, err);
            HttpResponse::Ok()
                .json(ApiResponse::<Value>::error("Failed to delete budget entry, please retry"))
        }
    }
}
