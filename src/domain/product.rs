use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category assigned when a product is created without one.
pub const DEFAULT_CATEGORY: &str = "T-Shirts";

/// Represents a product in the catalog.
///
/// `stock` is only changed through the catalog actor's stock actions and
/// `rating`/`review_count` only through the review aggregate action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: u32,
    #[serde(rename = "allowCOD")]
    pub allow_cod: bool,
    pub category: String,
    /// Main picture shown in listings.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Sizes on offer. Empty means the product is not sized.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Colors on offer. Empty means the product has no color choice.
    #[serde(default)]
    pub colors: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
    /// Review store revision the aggregate was computed at.
    #[serde(default)]
    pub review_revision: u64,
}

impl Product {
    /// Creates a new Product with no reviews.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (normally assigned by the catalog actor)
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `stock` - Units available
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock,
            allow_cod: true,
            category: DEFAULT_CATEGORY.to_string(),
            image: String::new(),
            images: Vec::new(),
            description: String::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            rating: 0.0,
            review_count: 0,
            review_revision: 0,
        }
    }
}

/// Params for adding a product to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: u32,
    #[serde(rename = "allowCOD")]
    pub allow_cod: bool,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
            allow_cod: true,
            category: DEFAULT_CATEGORY.to_string(),
            image: String::new(),
            images: Vec::new(),
            description: String::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
        }
    }

    pub fn without_cod(mut self) -> Self {
        self.allow_cod = false;
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_variants<S: Into<String>>(
        mut self,
        sizes: impl IntoIterator<Item = S>,
        colors: impl IntoIterator<Item = S>,
    ) -> Self {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }
}

/// Admin edits. Rating and review count are derived and cannot be set here.
///
/// `stock` replaces the stored level outright. Units held by an order in flight
/// are already gone from the stored level, and a restock for a failed order
/// lands on top of whatever was set here, so an edit made while orders are
/// being placed can count those units twice. Prefer editing stock when no
/// orders are in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    #[serde(rename = "allowCOD")]
    pub allow_cod: Option<bool>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
}
