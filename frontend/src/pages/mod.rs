pub mod calendar;
pub mod contacts;
pub mod email;
pub mod home;
pub mod knowledge;
pub mod not_found;
pub mod relationship_ops;
pub mod settings;
