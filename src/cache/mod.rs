// Cache module.
// Two-tier search result cache: in-memory map over a durable per-key store.

pub mod key;
pub mod paths;
pub mod search_cache;
pub mod store;

pub use key::CacheKey;
pub use search_cache::{CacheEntry, DEFAULT_TTL, SearchCache};
pub use store::{DurableStore, FileStore, MemoryStore};
