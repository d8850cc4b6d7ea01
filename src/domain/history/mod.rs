pub mod error;
pub mod model;
pub mod store;

pub use error::PersistenceError;
pub use model::HistoryEntry;
pub use store::SessionHistoryStore;

/// Maximum number of sessions retained
pub const HISTORY_CAPACITY: usize = 20;

/// Durable storage key holding the serialized history
pub const HISTORY_STORAGE_KEY: &str = "voice_history";

/// Characters of the original text kept in an entry
pub const EXCERPT_CHARS: usize = 100;
