use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::BookingError;
use crate::models::room::RoomFilter;
use crate::services::catalog_service::CatalogService;

#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    max_price: Option<f64>,
    /// Comma separated, e.g. `Free WiFi,Kitchen`
    amenities: Option<String>,
}

impl From<RoomQuery> for RoomFilter {
    fn from(query: RoomQuery) -> Self {
        let amenities = query
            .amenities
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        RoomFilter {
            max_price: query.max_price,
            amenities,
        }
    }
}

pub async fn get_rooms(query: web::Query<RoomQuery>) -> HttpResponse {
    let filter = RoomFilter::from(query.into_inner());
    HttpResponse::Ok().json(CatalogService::filter(&filter))
}

pub async fn get_room_by_id(path: web::Path<String>) -> Result<HttpResponse, BookingError> {
    let room = CatalogService::get(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(room))
}
