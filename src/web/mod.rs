pub mod handlers;
pub mod http;
pub mod identity;
pub mod router;
pub mod server;
pub mod views;
