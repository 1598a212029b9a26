//! Request and response bodies of the menu backend.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::EncodedPayload;

/// Category every dish falls back to. It can't be removed from a menu.
pub const DEFAULT_CATEGORY: &str = "其他";

/// Menu identifier as returned by the backend (number or string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Menu header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_category")]
    pub category_name: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Everything needed to render one menu: header, categories, dishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombineInfo {
    pub menu: Menu,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub dishes: Vec<Dish>,
}

/// Body of `POST /menus/add-dish`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDishRequest {
    pub menus_id: i64,
    pub name: String,
    pub category_name: String,
    pub image: EncodedPayload,
}

impl AddDishRequest {
    /// Build a request; a missing or blank category becomes [`DEFAULT_CATEGORY`].
    pub fn new(menus_id: i64, name: &str, category: Option<&str>, image: EncodedPayload) -> Self {
        let category_name = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();
        Self {
            menus_id,
            name: name.trim().to_string(),
            category_name,
            image,
        }
    }
}

/// Body of `POST /menus/save-categories`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveCategoriesRequest<'a> {
    pub menus_id: i64,
    pub categories: &'a [Category],
}

/// Body of `POST /menus/delete-dish`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteDishRequest<'a> {
    pub menus_id: i64,
    pub name: &'a str,
}
