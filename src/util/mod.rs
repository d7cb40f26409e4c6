pub mod validation;
pub mod currency;
pub mod email;
pub mod logger;
pub mod error;
