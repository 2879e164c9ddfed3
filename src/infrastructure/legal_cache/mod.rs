//! In-memory legal response cache

mod analytics;
mod maintenance;
mod preload;
mod service;
mod store;

pub use maintenance::spawn_expiry_task;
pub use preload::{preload_entries, PreloadEntry};
pub use service::{LegalCacheServiceTrait, LegalResponseCacheService};
pub use store::CacheEntryStore;
