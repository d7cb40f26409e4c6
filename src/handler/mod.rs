pub mod extract;
pub mod booking_handler;
pub mod contact_handler;
