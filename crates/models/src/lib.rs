pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod notification_settings;
pub mod pet;
pub mod pet_sitter;
pub mod pet_sitter_service;
pub mod booking;
pub mod booking_message;
pub mod review;
pub mod refresh_token;

#[cfg(test)]
mod tests;
