//! Name checks applied before anything is sent to the backend.
//!
//! Lengths count characters of the trimmed name, not bytes.

use crate::error::ApiError;

use super::types::{Category, DEFAULT_CATEGORY};

const DISH_NAME_MAX: usize = 20;
const CATEGORY_NAME_MAX: usize = 10;

fn check_name(kind: &str, value: &str, max: usize) -> Result<(), ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{} name must not be empty", kind)));
    }
    let len = trimmed.chars().count();
    if len > max {
        return Err(ApiError::Validation(format!(
            "{} name must be 1-{} characters, got {}",
            kind, max, len
        )));
    }
    Ok(())
}

pub fn validate_dish_name(name: &str) -> Result<(), ApiError> {
    check_name("Dish", name, DISH_NAME_MAX)
}

pub fn validate_category_name(name: &str) -> Result<(), ApiError> {
    check_name("Category", name, CATEGORY_NAME_MAX)
}

/// Turn user-entered names into a category list ready to save.
///
/// Names are trimmed and validated, duplicates are rejected, and
/// [`DEFAULT_CATEGORY`] is appended if the list lacks it.
pub fn prepare_categories<S: AsRef<str>>(names: &[S]) -> Result<Vec<Category>, ApiError> {
    let mut categories: Vec<Category> = Vec::with_capacity(names.len() + 1);
    for name in names {
        let name = name.as_ref().trim();
        validate_category_name(name)?;
        if categories.iter().any(|c| c.name == name) {
            return Err(ApiError::Validation(format!(
                "Category \"{}\" is listed twice",
                name
            )));
        }
        categories.push(Category::new(name));
    }
    if !categories.iter().any(|c| c.name == DEFAULT_CATEGORY) {
        categories.push(Category::new(DEFAULT_CATEGORY));
    }
    Ok(categories)
}
