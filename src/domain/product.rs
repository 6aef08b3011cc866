use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a product offered in the catalog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to customers.
    pub description: Option<String>,
    /// Price represented in the smallest currency unit.
    pub price: i64,
    /// Optional reference to an image of the product.
    pub image_url: Option<String>,
    /// Category label used for filtering.
    pub category: String,
    /// Units currently available to be ordered.
    pub stock: i32,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
}

impl Product {
    /// Price of `quantity` units, or `None` if the amount does not fit in `i64`.
    pub fn line_total(&self, quantity: i32) -> Option<i64> {
        self.price.checked_mul(i64::from(quantity))
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub image_url: Option<String>,
    pub category: String,
    pub stock: i32,
    pub created_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: i64,
        stock: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            image_url: None,
            category: category.into(),
            stock,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an image reference to the product payload.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Override the creation timestamp.
    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Ordering applied to catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Most recently created first.
    #[default]
    Newest,
}

impl From<&str> for SortMode {
    fn from(value: &str) -> Self {
        match value {
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            _ => Self::Newest,
        }
    }
}

impl From<Option<&str>> for SortMode {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

/// Query definition used to list catalog products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Normalized (trimmed, lowercase) category label to match exactly.
    pub category: Option<String>,
    /// Ordering of the results.
    pub sort: SortMode,
}

impl ProductListQuery {
    /// Construct a query that targets the whole catalog, newest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by category. The raw value is normalized first and
    /// a value that is blank after normalization leaves the filter unset.
    pub fn category(mut self, raw: &str) -> Self {
        self.category = normalize_category(raw);
        self
    }

    /// Order the results with the given mode.
    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}

/// Normalize a category filter as typed into a query string.
///
/// Literal `+` and `%20` sequences are treated as spaces, surrounding
/// whitespace is dropped and the result is lowercased.
pub fn normalize_category(raw: &str) -> Option<String> {
    let normalized = raw
        .replace('+', " ")
        .replace("%20", " ")
        .trim()
        .to_lowercase();

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}
