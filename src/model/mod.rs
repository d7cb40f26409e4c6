pub mod room;
pub mod booking;
pub mod contact;
