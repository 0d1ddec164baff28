//! Wire types and client-side view logic for the AI admin front-end.
//!
//! Nothing in this crate touches the browser, so all of it is tested on
//! the host.

pub mod api;
pub mod contacts;
pub mod error;
pub mod fetch;
pub mod integration;
pub mod models;
pub mod notice;
pub mod runs;
pub mod settings;
pub mod store;
