pub mod ai_service;
pub mod budget_service;
pub mod map_service;
pub mod normalizer;
pub mod plan_service;
pub mod user_service;
