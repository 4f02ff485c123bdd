pub mod booking;
pub mod contact;
pub mod room;
