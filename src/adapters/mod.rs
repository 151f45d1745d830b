pub mod clock;
pub mod data_api;
