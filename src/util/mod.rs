pub mod error;
pub mod extract;
pub mod jwt;
pub mod logger;
pub mod password;
