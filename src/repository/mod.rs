use crate::db::{DbConnection, DbPool};
use crate::domain::order::{NewOrder, NewOrderItem, Order, OrderItem, OrderListQuery};
use crate::domain::product::{NewProduct, Product, ProductListQuery};

pub mod errors;
pub mod order;
pub mod product;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the product catalog.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    /// Products matching `query`, fully ordered. The category filter is
    /// compared against the lowercased stored category.
    fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<Vec<Product>>;
    fn count_products(&self) -> RepositoryResult<usize>;
}

/// Write operations over the product catalog.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize>;
}

/// Read-only operations over the order ledger.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    /// Orders matching `query` with their lines, newest first.
    fn list_orders(&self, query: &OrderListQuery) -> RepositoryResult<Vec<Order>>;
}

/// Row-level operations available while an order placement transaction is open.
pub trait OrderStore {
    /// Read a product while holding the transaction's write lock.
    fn find_product_for_update(&mut self, id: i32) -> RepositoryResult<Option<Product>>;
    /// Insert the order header. The returned order has no lines yet.
    fn insert_order(&mut self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn insert_order_item(
        &mut self,
        order_id: i32,
        item: &NewOrderItem,
    ) -> RepositoryResult<OrderItem>;
    /// Take `quantity` units out of stock. Returns `false` and leaves the row
    /// untouched when fewer than `quantity` units remain.
    fn decrement_stock(&mut self, product_id: i32, quantity: i32) -> RepositoryResult<bool>;
}

/// Scoped access to a transactional [`OrderStore`].
///
/// The transaction commits when `work` returns `Ok` and rolls back when it
/// returns `Err` or panics, so no partial writes survive a failed placement.
pub trait UnitOfWork {
    fn in_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn OrderStore) -> Result<T, E>,
        E: From<RepositoryError>;
}
