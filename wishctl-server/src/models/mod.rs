//! Domain models with validation at construction
//!
//! Caller input becomes a [`NewWish`] only after its fields pass validation,
//! so the store never sees an empty name or wish text.

pub mod validation;
pub mod wish;

pub use validation::ValidationError;
pub use wish::{NewWish, Wish, WishId, WishName, WishText};
