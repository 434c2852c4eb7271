//! Persistence layer (local key-value snapshots).

pub mod store;

pub use store::{LocalStore, StoreError};

/// Storage keys as constants.
pub mod keys {
    pub const USER: &str = "user";
    pub const BOOKS: &str = "books";
    pub const STATS: &str = "stats";
    pub const THEME: &str = "theme";
    /// Earned badges (append-only)
    pub const BADGES: &str = "badges";
    /// Daily reading log history
    pub const LOGS: &str = "logs";
    pub const QUESTS: &str = "quests";
    pub const CHALLENGES: &str = "challenges";
}
