pub mod aid_handler;
pub mod dues_handler;
pub mod loan_handler;
pub mod member_handler;
pub mod user_handler;
