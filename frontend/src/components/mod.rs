pub mod calendar_events;
pub mod header;
pub mod integration_card;
pub mod run_history;
pub mod toast;
