pub mod admin;
pub mod auth;
pub mod contact;
pub mod leads;
pub mod properties;
pub mod users;
