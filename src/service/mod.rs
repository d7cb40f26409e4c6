pub mod booking_service;
pub mod booking_desk;
pub mod contact_service;
pub mod newsletter_service;
