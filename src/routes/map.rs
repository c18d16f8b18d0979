use actix_web::{web, HttpResponse, Responder};

use crate::models::place::PlaceInfo;
use crate::services::map_service::MapService;

#[derive(serde::Deserialize)]
pub struct NearbyParams {
    lng: f64,
    lat: f64,
    #[serde(rename = "type")]
    category: String,
}

/*
    GET /api/map/nearby?lng={lng}&lat={lat}&type={restaurant|hotel|traffic}

    Returns a bare JSON array, not the response envelope; the map panel
    consumes it directly.
*/
pub async fn nearby(params: web::Query<NearbyParams>) -> impl Responder {
    let service = match MapService::from_env() {
        Ok(service) => service,
        Err(err) => {
            log::warn!("nearby-place lookup unavailable: {}", err);
            return HttpResponse::Ok().json(Vec::<PlaceInfo>::new());
        }
    };

    let places = service.search_nearby(params.lng, params.lat, &params.category).await;
    HttpResponse::Ok().json(places)
}
