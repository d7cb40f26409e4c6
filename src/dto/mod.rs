pub mod booking_dto;
pub mod contact_dto;
pub mod field;
