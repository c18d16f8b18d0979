use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::env;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

/*
    GET /health
*/
pub async fn health_check(data: web::Data<SqlitePool>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let database_result = check_database(data.get_ref()).await;
    health
        .services
        .insert("database".to_string(), database_result.clone());

    // The AI and map services only need their keys to be present;
    // actual calls are made per request.
    let ai_result = check_key("OPENAI_API_KEY");
    health.services.insert("ai".to_string(), ai_result.clone());

    let map_result = check_key("AMAP_KEY");
    health.services.insert("map".to_string(), map_result.clone());

    if database_result.status != "ok" || ai_result.status != "ok" || map_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_database(pool: &SqlitePool) -> ServiceStatus {
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Connected successfully to SQLite".to_string()),
        },
        Err(e) => {
            log::error!("database health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to query: {}", e)),
            }
        }
    }
}

fn check_key(name: &str) -> ServiceStatus {
    match env::var(name) {
        Ok(key) => {
            let masked_key = if key.len() > 8 {
                format!("{}***{}", &key[0..4], &key[key.len() - 4..])
            } else {
                "***".to_string()
            };

            ServiceStatus {
                status: "ok".to_string(),
                details: Some(format!("{} configured ({})", name, masked_key)),
            }
        }
        Err(_) => ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("{} not configured", name)),
        },
    }
}
