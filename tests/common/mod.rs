use actix_web::{web, App};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use wayfarer_api::db::initialize_database;
use wayfarer_api::routes;

pub struct TestApp {
    pub pool: SqlitePool,
}

impl TestApp {
    /// Fresh app over a private in-memory database.
    pub async fn new() -> Self {
        // A single connection keeps every statement on the same
        // in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        initialize_database(&pool)
            .await
            .expect("Failed to initialize schema");

        Self { pool }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.pool.clone()))
            .configure(routes::configure)
    }
}
