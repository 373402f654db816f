//! HTTP API handlers for vibevault-api

pub mod health;
pub mod media;
pub mod user;
pub mod vibes;

pub use health::health_routes;
pub use media::media_routes;
pub use user::CurrentUser;
pub use vibes::vibe_routes;
