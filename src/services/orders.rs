use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Deserialize;

use crate::domain::order::{NewOrder, NewOrderItem, Order, OrderListQuery, PlaceOrder};
use crate::domain::product::Product;
use crate::forms::orders::PlaceOrderForm;
use crate::repository::{OrderReader, OrderStore, UnitOfWork};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the order history lookup.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Exact email address the orders were placed with.
    #[serde(default)]
    pub email: String,
}

/// Validates the request and places the order in a single transaction.
///
/// Every product is read once inside the transaction; that price is used both
/// for the order total and for each line's `price_at_time`. Any failure rolls
/// the whole order back, including stock changes.
pub fn place_order<R>(repo: &R, form: PlaceOrderForm) -> ServiceResult<Order>
where
    R: UnitOfWork + ?Sized,
{
    let request = form.into_place_order()?;

    let result = repo.in_transaction(|store| commit_order(store, &request));

    match &result {
        Ok(order) => log::info!(
            "Placed order {} with {} items, total {}",
            order.id,
            order.order_items.len(),
            order.total_amount
        ),
        Err(err @ (ServiceError::ProductNotFound(_) | ServiceError::InsufficientStock { .. })) => {
            log::warn!("Rejected order: {err}")
        }
        Err(err) => log::error!("Failed to place order: {err}"),
    }

    result
}

fn commit_order(store: &mut dyn OrderStore, request: &PlaceOrder) -> ServiceResult<Order> {
    let mut products: HashMap<i32, Product> = HashMap::new();
    let mut requested: HashMap<i32, i32> = HashMap::new();
    let mut items = Vec::with_capacity(request.lines.len());
    let mut total_amount: i64 = 0;

    for line in &request.lines {
        let product = match products.entry(line.product_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let product = store
                    .find_product_for_update(line.product_id)?
                    .ok_or(ServiceError::ProductNotFound(line.product_id))?;
                entry.insert(product)
            }
        };

        // Repeated lines for one product draw from the same stock.
        let quantity = requested.entry(product.id).or_insert(0);
        *quantity = quantity
            .checked_add(line.quantity)
            .ok_or_else(|| ServiceError::Validation("quantity is too large".to_string()))?;

        if product.stock < *quantity {
            return Err(insufficient_stock(product));
        }

        total_amount = product
            .line_total(line.quantity)
            .and_then(|line_total| total_amount.checked_add(line_total))
            .ok_or_else(|| ServiceError::Validation("order total is too large".to_string()))?;

        items.push(NewOrderItem::new(product.id, line.quantity, product.price));
    }

    let new_order = NewOrder::new(
        request.customer_email.as_str(),
        request.customer_name.as_str(),
        request.shipping_address.as_str(),
        total_amount,
    );
    let mut order = store.insert_order(&new_order)?;

    for item in &items {
        if !store.decrement_stock(item.product_id, item.quantity)? {
            return Err(match products.get(&item.product_id) {
                Some(product) => insufficient_stock(product),
                None => ServiceError::ProductNotFound(item.product_id),
            });
        }
        order
            .order_items
            .push(store.insert_order_item(order.id, item)?);
    }

    Ok(order)
}

fn insufficient_stock(product: &Product) -> ServiceError {
    ServiceError::InsufficientStock {
        product_id: product.id,
        product_name: product.name.clone(),
    }
}

/// Lists every order placed with exactly `email`, newest first.
///
/// The comparison is case-sensitive; a blank email matches nothing.
pub fn list_orders_by_customer<R>(repo: &R, email: &str) -> ServiceResult<Vec<Order>>
where
    R: OrderReader + ?Sized,
{
    if email.is_empty() {
        return Ok(Vec::new());
    }

    repo.list_orders(&OrderListQuery::new().customer_email(email))
        .map_err(ServiceError::from)
}

/// Loads a single order with its lines.
pub fn get_order<R>(repo: &R, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    repo.get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}
