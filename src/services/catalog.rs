use serde::Deserialize;

use crate::domain::product::{NewProduct, Product, ProductListQuery, SortMode};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional category label; matched case- and whitespace-insensitively.
    pub category: Option<String>,
    /// `price_asc`, `price_desc`, or anything else for newest first.
    pub sort: Option<String>,
}

/// Lists catalog products matching the category filter in the requested order.
///
/// An unknown category yields an empty list rather than an error.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let ProductsQuery { category, sort } = query;

    let mut list_query = ProductListQuery::new().sort(SortMode::from(sort.as_deref()));

    if let Some(raw) = category.as_deref() {
        list_query = list_query.category(raw);
    }

    let products = repo
        .list_products(&list_query)
        .map_err(ServiceError::from)?;

    log::debug!(
        "Listed {} products (category={:?}, sort={:?})",
        products.len(),
        list_query.category,
        list_query.sort
    );

    Ok(products)
}

/// Inserts the sample catalog when no products exist yet.
///
/// Returns the number of inserted products, which is zero when the catalog
/// already has content.
pub fn seed_catalog<R>(repo: &R) -> ServiceResult<usize>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if repo.count_products().map_err(ServiceError::from)? > 0 {
        return Ok(0);
    }

    let inserted = repo
        .create_products(&sample_products())
        .map_err(ServiceError::from)?;

    log::info!("Seeded catalog with {inserted} products");

    Ok(inserted)
}

fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct::new("Nasi Goreng Spesial", "Paket Harian", 25_000, 50)
            .with_description("Nasi goreng spesial"),
        NewProduct::new("Paket Salad Diet", "Paket Diet", 35_000, 30)
            .with_description("Salad diet"),
        NewProduct::new("Lumpiah Vegan", "Paket Vegan", 20_000, 40)
            .with_description("Lumpiah vegan"),
        NewProduct::new("Brownies Coklat", "Snack", 15_000, 100)
            .with_description("Brownies coklat"),
        NewProduct::new("Ayam Bakar Madu", "Paket Harian", 30_000, 25)
            .with_description("Ayam bakar madu"),
    ]
}
