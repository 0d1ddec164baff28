pub mod api;
pub mod browser;
pub mod contacts;
pub mod integrations;
