use actix_web::web;

pub mod ai;
pub mod budget;
pub mod health;
pub mod map;
pub mod plan;
pub mod spot;
pub mod user;

/// Full route tree, mounted by the server and by integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api")
            .service(
                web::scope("/plan")
                    .route("/save", web::post().to(plan::save_plan))
                    .route("/list/{userId}", web::get().to(plan::list_plans))
                    .route("/search", web::get().to(plan::search_plans))
                    .route("/delete/{planId}", web::delete().to(plan::delete_plan)),
            )
            .service(web::scope("/spot").route("/list/{planId}", web::get().to(spot::list_spots)))
            .service(
                web::scope("/budget")
                    .route("/add", web::post().to(budget::add_budget))
                    .route("/list/{planId}", web::get().to(budget::list_budget))
                    .route("/delete/{id}", web::delete().to(budget::delete_budget)),
            )
            .service(
                web::scope("/user")
                    .route("/register", web::post().to(user::register))
                    .route("/login", web::post().to(user::login))
                    .route("/preference", web::get().to(user::get_preferences))
                    .route("/preferences/save", web::post().to(user::save_preferences)),
            )
            .service(
                web::scope("/ai")
                    .route("/generate", web::post().to(ai::generate_plan))
                    .route("/budget/analyze", web::post().to(ai::analyze_budget)),
            )
            .service(web::scope("/map").route("/nearby", web::get().to(map::nearby))),
    );
}
