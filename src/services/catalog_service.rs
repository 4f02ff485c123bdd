use crate::errors::BookingError;
use crate::models::room::{RoomFilter, RoomType};

static ROOM_TYPES: [RoomType; 3] = [
    RoomType {
        id: "deluxe",
        display_name: "Deluxe Room",
        nightly_price: 200.0,
        amenities: &["Free WiFi", "Room Service", "Mini Bar", "TV"],
        size: "40m²",
        occupancy: "2 Adults, 1 Child",
        description: "Modern comfort meets elegant design in our Deluxe Room, featuring city views and premium amenities.",
        rating: 4.8,
        reviews: 124,
    },
    RoomType {
        id: "suite",
        display_name: "Suite",
        nightly_price: 350.0,
        amenities: &["Free WiFi", "Room Service", "Living Area", "Kitchen"],
        size: "65m²",
        occupancy: "2 Adults, 2 Children",
        description: "Spacious suite with separate living area and panoramic ocean views. Perfect for families.",
        rating: 4.9,
        reviews: 89,
    },
    RoomType {
        id: "executive",
        display_name: "Executive Suite",
        nightly_price: 500.0,
        amenities: &["Free WiFi", "Butler Service", "Jacuzzi", "Ocean View"],
        size: "85m²",
        occupancy: "3 Adults, 2 Children",
        description: "Luxury suite with private terrace, jacuzzi, and butler service. The epitome of luxury living.",
        rating: 5.0,
        reviews: 156,
    },
];

pub struct CatalogService;

impl CatalogService {
    /// All room types in display order
    pub fn all() -> &'static [RoomType] {
        &ROOM_TYPES
    }

    pub fn get(id: &str) -> Result<&'static RoomType, BookingError> {
        Self::find(id).ok_or_else(|| BookingError::RoomNotFound(id.to_string()))
    }

    pub fn find(id: &str) -> Option<&'static RoomType> {
        ROOM_TYPES.iter().find(|room| room.id == id)
    }

    pub fn filter(filter: &RoomFilter) -> Vec<&'static RoomType> {
        ROOM_TYPES.iter().filter(|room| filter.matches(room)).collect()
    }
}
