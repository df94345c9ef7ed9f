//! Repository implementations for database access

pub mod wishes;

pub use wishes::SqliteWishStore;
