pub mod bookings;
pub mod contact;
pub mod health;
pub mod rooms;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/rooms")
                        .route("", web::get().to(rooms::get_rooms))
                        .route("/{id}", web::get().to(rooms::get_room_by_id)),
                )
                .service(
                    web::scope("/bookings")
                        .route("", web::post().to(bookings::create))
                        .route("/{id}", web::get().to(bookings::get_by_id))
                        .route("/{id}", web::delete().to(bookings::discard))
                        .route("/{id}/fields", web::put().to(bookings::set_field))
                        .route("/{id}/advance", web::post().to(bookings::advance))
                        .route("/{id}/retreat", web::post().to(bookings::retreat))
                        .route("/{id}/submit", web::post().to(bookings::submit))
                        .route("/{id}/reset", web::post().to(bookings::reset)),
                )
                .route("/contact", web::post().to(contact::send_message)),
        );
}
