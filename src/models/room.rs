use serde::Serialize;

/// A bookable room type. Catalog entries are static and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomType {
    pub id: &'static str,
    pub display_name: &'static str,
    pub nightly_price: f64,
    pub amenities: &'static [&'static str],
    pub size: &'static str,
    pub occupancy: &'static str,
    pub description: &'static str,
    pub rating: f32,
    pub reviews: u32,
}

impl RoomType {
    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities
            .iter()
            .any(|a| a.eq_ignore_ascii_case(amenity.trim()))
    }
}

/// Query accepted by the rooms listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomFilter {
    pub max_price: Option<f64>,
    pub amenities: Vec<String>,
}

impl RoomFilter {
    pub fn matches(&self, room: &RoomType) -> bool {
        let within_budget = self
            .max_price
            .map_or(true, |max| room.nightly_price <= max);

        within_budget && self.amenities.iter().all(|a| room.has_amenity(a))
    }
}
