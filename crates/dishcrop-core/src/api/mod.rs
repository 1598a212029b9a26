//! Client for the menu backend.
//!
//! Covers the four endpoints the menu tools use (`combine-info`,
//! `save-categories`, `add-dish`, `delete-dish`), name validation, and
//! retries for transient failures. The image pipeline knows nothing
//! about this module; callers hand it an [`EncodedPayload`](crate::EncodedPayload).

pub mod client;
pub mod retry;
pub mod types;
pub mod validate;

pub use client::MenuClient;
pub use types::{AddDishRequest, Category, CombineInfo, Dish, Menu, MenuId, DEFAULT_CATEGORY};
pub use validate::{prepare_categories, validate_category_name, validate_dish_name};
