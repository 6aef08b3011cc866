use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Possible lifecycle states for a customer order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been placed and awaits fulfilment.
    #[default]
    Pending,
    /// Order has been fulfilled.
    Completed,
    /// Order has been cancelled and should not be processed further.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        value.as_str()
    }
}

/// Domain representation of a placed order together with its lines.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// Email address of the customer who placed the order.
    pub customer_email: String,
    /// Display name of the customer.
    pub customer_name: String,
    /// Address the order is shipped to.
    pub shipping_address: String,
    /// Lines of the order, in insertion order.
    pub order_items: Vec<OrderItem>,
    /// Sum of `price_at_time * quantity` over all lines, in the smallest currency unit.
    pub total_amount: i64,
    /// Current lifecycle status of the order.
    pub status: OrderStatus,
    /// Timestamp for when the order record was created.
    pub created_at: NaiveDateTime,
}

/// A single line of an order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// Unit price charged for the product when the order was placed.
    pub price_at_time: i64,
}

/// Payload required to insert a new order header.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_email: String,
    pub customer_name: String,
    pub shipping_address: String,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
}

impl NewOrder {
    /// Build a pending order payload stamped with the current time.
    pub fn new(
        customer_email: impl Into<String>,
        customer_name: impl Into<String>,
        shipping_address: impl Into<String>,
        total_amount: i64,
    ) -> Self {
        Self {
            customer_email: customer_email.into(),
            customer_name: customer_name.into(),
            shipping_address: shipping_address.into(),
            total_amount,
            status: OrderStatus::default(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Payload required to insert an order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub quantity: i32,
    pub price_at_time: i64,
}

impl NewOrderItem {
    pub fn new(product_id: i32, quantity: i32, price_at_time: i64) -> Self {
        Self {
            product_id,
            quantity,
            price_at_time,
        }
    }
}

/// A product and quantity requested by a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i32,
    pub quantity: i32,
}

/// Validated order request ready to be placed.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub customer_email: String,
    pub customer_name: String,
    pub shipping_address: String,
    /// Requested lines; never empty and every quantity is positive.
    pub lines: Vec<OrderLine>,
}

/// Query definition used to list orders.
#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    /// Optional exact, case-sensitive customer email filter.
    pub customer_email: Option<String>,
}

impl OrderListQuery {
    /// Construct a query that targets all orders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results to orders placed with exactly this email.
    pub fn customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }
}
