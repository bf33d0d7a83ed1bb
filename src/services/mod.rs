pub mod message_service;

pub use message_service::{deliver, MessageStore, PgMessageStore, StoreError};
