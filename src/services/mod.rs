pub mod ai_client;
pub mod event_stream;
pub mod hub_client;
