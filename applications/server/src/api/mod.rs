/// API route modules
pub mod auth;
pub mod health;
pub mod playlists;
pub mod tracks;
pub mod uploads;
