pub mod access_guard;
pub mod export_service;
pub mod moderation_service;
pub mod user_lookup_service;
