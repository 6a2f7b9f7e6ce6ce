pub mod health;
pub mod storage_events;
pub mod upload_url;
