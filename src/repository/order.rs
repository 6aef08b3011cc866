use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::order::{
        NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem, Order as DomainOrder,
        OrderItem as DomainOrderItem, OrderListQuery,
    },
    domain::product::Product as DomainProduct,
    models::order::{
        NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
        OrderItem as DbOrderItem,
    },
    models::product::Product as DbProduct,
    repository::{
        DieselRepository, OrderReader, OrderStore, RepositoryError, RepositoryResult, UnitOfWork,
    },
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = order_items::table
            .filter(order_items::order_id.eq(order.id))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        Ok(Some(DomainOrder::from((order, items))))
    }

    fn list_orders(&self, query: &OrderListQuery) -> RepositoryResult<Vec<DomainOrder>> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        let mut items = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(email) = query.customer_email.as_ref() {
            items = items.filter(orders::customer_email.eq(email));
        }

        items = items.order((orders::created_at.desc(), orders::id.desc()));

        let db_orders = items.load::<DbOrder>(&mut conn)?;
        if db_orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = db_orders.iter().map(|order| order.id).collect();

        let mut items_by_order: HashMap<i32, Vec<DbOrderItem>> = HashMap::new();
        let rows = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        for item in rows {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let orders = db_orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                DomainOrder::from((order, items))
            })
            .collect();

        Ok(orders)
    }
}

/// Carries either the caller's error or a failure of the transaction itself
/// (`BEGIN`/`COMMIT`/`ROLLBACK`) out of the diesel transaction closure.
enum TransactionError<E> {
    Aborted(E),
    Database(diesel::result::Error),
}

impl<E> From<diesel::result::Error> for TransactionError<E> {
    fn from(value: diesel::result::Error) -> Self {
        Self::Database(value)
    }
}

impl UnitOfWork for DieselRepository {
    fn in_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn OrderStore) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;

        // BEGIN IMMEDIATE takes the write lock up front, so concurrent
        // placements serialize before their stock checks.
        conn.immediate_transaction::<T, TransactionError<E>, _>(|conn| {
            let mut store = DieselOrderStore { conn };
            work(&mut store).map_err(TransactionError::Aborted)
        })
        .map_err(|err| match err {
            TransactionError::Aborted(inner) => inner,
            TransactionError::Database(db) => E::from(RepositoryError::from(db)),
        })
    }
}

/// [`OrderStore`] bound to a connection with an open transaction.
struct DieselOrderStore<'a> {
    conn: &'a mut SqliteConnection,
}

impl OrderStore for DieselOrderStore<'_> {
    fn find_product_for_update(&mut self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut *self.conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn insert_order(&mut self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        let db_new = DbNewOrder::from(new_order);
        let created = diesel::insert_into(orders::table)
            .values(&db_new)
            .get_result::<DbOrder>(&mut *self.conn)?;

        Ok(created.into_domain(Vec::new()))
    }

    fn insert_order_item(
        &mut self,
        order_id: i32,
        item: &DomainNewOrderItem,
    ) -> RepositoryResult<DomainOrderItem> {
        use crate::schema::order_items;

        let db_new = DbNewOrderItem::from_domain(order_id, item);
        let created = diesel::insert_into(order_items::table)
            .values(&db_new)
            .get_result::<DbOrderItem>(&mut *self.conn)?;

        Ok(created.into())
    }

    fn decrement_stock(&mut self, product_id: i32, quantity: i32) -> RepositoryResult<bool> {
        use crate::schema::products;

        let target = products::table
            .filter(products::id.eq(product_id))
            .filter(products::stock.ge(quantity));

        let updated = diesel::update(target)
            .set(products::stock.eq(products::stock - quantity))
            .execute(&mut *self.conn)?;

        Ok(updated == 1)
    }
}
