//! HTTP client for the menu backend.

use std::time::Duration;

use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::ApiError;

use super::retry::{backoff_duration, is_retryable};
use super::types::{
    AddDishRequest, Category, CombineInfo, DeleteDishRequest, SaveCategoriesRequest,
};
use super::validate::{validate_category_name, validate_dish_name};

/// Client for the `/menus` endpoints.
#[derive(Debug, Clone)]
pub struct MenuClient {
    client: reqwest::Client,
    base_url: String,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl MenuClient {
    /// Build a client from the `[api]` config section.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ApiError::Request {
                endpoint: config.base_url.clone(),
                message: format!("Cannot build HTTP client: {e}"),
                timed_out: false,
                connect: false,
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry_attempts: config.retry_attempts,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    /// Fetch a menu with its categories and dishes.
    pub async fn combine_info(&self, menu_id: i64) -> Result<CombineInfo, ApiError> {
        let path = format!("/menus/combine-info/{menu_id}");
        let url = self.url(&path);
        let resp = self.send(&path, || self.client.get(&url)).await?;
        resp.json::<CombineInfo>().await.map_err(|e| ApiError::Decode {
            endpoint: path,
            message: e.to_string(),
        })
    }

    /// Replace a menu's category list.
    ///
    /// Use [`prepare_categories`](super::prepare_categories) to build the list.
    pub async fn save_categories(
        &self,
        menu_id: i64,
        categories: &[Category],
    ) -> Result<(), ApiError> {
        for category in categories {
            validate_category_name(&category.name)?;
        }
        let body = SaveCategoriesRequest {
            menus_id: menu_id,
            categories,
        };
        self.post("/menus/save-categories", &body).await?;
        tracing::info!("Saved {} categories for menu {}", categories.len(), menu_id);
        Ok(())
    }

    /// Create a dish with its normalized photo.
    pub async fn add_dish(&self, request: &AddDishRequest) -> Result<(), ApiError> {
        validate_dish_name(&request.name)?;
        validate_category_name(&request.category_name)?;
        self.post("/menus/add-dish", request).await?;
        tracing::info!(
            "Added dish {:?} to menu {} under {:?} ({} base64 bytes)",
            request.name,
            request.menus_id,
            request.category_name,
            request.image.len()
        );
        Ok(())
    }

    /// Remove a dish by name.
    pub async fn delete_dish(&self, menu_id: i64, name: &str) -> Result<(), ApiError> {
        let name = name.trim();
        validate_dish_name(name)?;
        let body = DeleteDishRequest {
            menus_id: menu_id,
            name,
        };
        self.post("/menus/delete-dish", &body).await?;
        tracing::info!("Deleted dish {:?} from menu {}", name, menu_id);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        self.send(path, || self.client.post(&url).json(body))
            .await
            .map(drop)
    }

    /// Send a request, retrying transient failures with exponential backoff.
    async fn send<F>(&self, path: &str, build: F) -> Result<reqwest::Response, ApiError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            match self.send_once(path, build()).await {
                Err(e) if attempt < self.retry_attempts && is_retryable(&e) => {
                    let delay = backoff_duration(attempt, self.retry_delay_ms);
                    tracing::warn!(
                        "{} failed (attempt {}/{}): {}. Retrying in {:?}",
                        path,
                        attempt + 1,
                        self.retry_attempts + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn send_once(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = request.send().await.map_err(|e| ApiError::Request {
            endpoint: path.to_string(),
            message: e.to_string(),
            timed_out: e.is_timeout(),
            connect: e.is_connect(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!("{} -> {}", path, status);
        Ok(resp)
    }
}
