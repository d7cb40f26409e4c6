pub mod booking_router;
pub mod contact_router;
