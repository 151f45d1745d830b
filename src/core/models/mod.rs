pub mod audit_event;
pub mod framework;
pub mod identity;
pub mod report;
pub mod role;
pub mod supplier_export;
pub mod user;
