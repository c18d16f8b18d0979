pub mod ai;
pub mod budget;
pub mod place;
pub mod plan;
pub mod response;
pub mod user;
