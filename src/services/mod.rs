pub mod booking_flow;
pub mod catalog_service;
pub mod contact_service;
pub mod gateway;
pub mod pricing_service;
pub mod validation;
