pub mod channel_event_publisher;
pub mod in_memory_directory;
pub mod scope_authorization_service;

pub use channel_event_publisher::*;
pub use in_memory_directory::*;
pub use scope_authorization_service::*;
