//! Remote catalog client.
//!
//! Thin wrapper over the catalog REST service: list products, list
//! categories, create and update products. Each call is a single attempt
//! with no retries, and the client never mutates local state — callers own
//! that.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compiled-in base URL of the catalog service.
pub const DEFAULT_BASE_URL: &str = "https://api.escuelajs.co/api/v1";

/// A named grouping referenced by id from a product. Read-only from this
/// client's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// A catalog item as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Request body for create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: u64,
    pub images: Vec<String>,
}

impl ProductDraft {
    /// Required-field check, run before any network call.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation {
                status: None,
                message: "Title is required".to_string(),
            });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ApiError::Validation {
                status: None,
                message: "Price must be a non-negative number".to_string(),
            });
        }
        if self.category_id == 0 {
            return Err(ApiError::Validation {
                status: None,
                message: "Category is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Failure taxonomy for catalog calls.
///
/// `Network` covers transport failures and non-success statuses on the list
/// endpoints. `Validation` covers service-rejected create/update payloads
/// (carrying the service message when the body has one) and required-field
/// omissions caught client-side, where `status` is `None`.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Validation { status: Option<u16>, message: String },
}

/// Async client for the catalog service. Cheap to clone; the underlying
/// connection pool is shared.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a non-default service, e.g. a local test server.
    pub fn with_base_url(base_url: &str) -> Self {
        CatalogClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /products` — the full product list.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json(&format!("{}/products", self.base_url)).await
    }

    /// `GET /categories` — the full category list.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json(&format!("{}/categories", self.base_url)).await
    }

    /// `POST /products/` — create a product from a validated draft.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        draft.validate()?;
        let url = format!("{}/products/", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(network)?;
        read_product(response).await
    }

    /// `PUT /products/{id}` — update one product from a validated draft.
    pub async fn update_product(&self, id: u64, draft: &ProductDraft) -> Result<Product, ApiError> {
        draft.validate()?;
        let url = format!("{}/products/{}", self.base_url, id);
        let response = self
            .http
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(network)?;
        read_product(response).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.http.get(url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Network(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }
        response.json().await.map_err(network)
    }
}

/// Decode a create/update response, surfacing the service's own message on
/// rejection.
async fn read_product(response: reqwest::Response) -> Result<Product, ApiError> {
    let status = response.status();
    if status.is_success() {
        return response.json().await.map_err(network);
    }

    let body: serde_json::Value = response
        .json()
        .await
        .unwrap_or(serde_json::Value::Null);
    let message = match body.get("message") {
        Some(serde_json::Value::String(m)) => m.clone(),
        Some(other) => other.to_string(),
        None => format!("service rejected the request (HTTP {})", status),
    };
    log::warn!("create/update rejected with HTTP {}: {}", status, message);

    Err(ApiError::Validation {
        status: Some(status.as_u16()),
        message,
    })
}

fn network(error: reqwest::Error) -> ApiError {
    ApiError::Network(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            title: "Linen Shirt".to_string(),
            price: 29.0,
            description: "Plain weave".to_string(),
            category_id: 1,
            images: vec!["https://example.com/shirt.jpg".to_string()],
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut d = draft();
        d.title = "   ".to_string();
        match d.validate() {
            Err(ApiError::Validation { status: None, .. }) => {}
            other => panic!("expected client-side validation error, got {:?}", other),
        }
    }

    #[test]
    fn negative_or_nan_price_is_rejected() {
        let mut d = draft();
        d.price = -1.0;
        assert!(d.validate().is_err());
        d.price = f64::NAN;
        assert!(d.validate().is_err());
    }

    #[test]
    fn missing_category_is_rejected() {
        let mut d = draft();
        d.category_id = 0;
        assert!(d.validate().is_err());
    }

    #[test]
    fn draft_serializes_with_camel_case_category_id() {
        let json = serde_json::to_value(draft()).unwrap();
        assert!(json.get("categoryId").is_some());
        assert!(json.get("category_id").is_none());
    }
}
