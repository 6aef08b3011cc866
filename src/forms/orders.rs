use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::{OrderLine, PlaceOrder};

/// Maximum allowed length for an email address.
const EMAIL_MAX_LEN: usize = 100;
const EMAIL_MAX_LEN_VALIDATOR: u64 = EMAIL_MAX_LEN as u64;

/// Maximum allowed length for a customer name.
const NAME_MAX_LEN: usize = 100;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a shipping address.
const ADDRESS_MAX_LEN: usize = 200;
const ADDRESS_MAX_LEN_VALIDATOR: u64 = ADDRESS_MAX_LEN as u64;

/// Result type returned by the order form helpers.
pub type OrderFormResult<T> = Result<T, OrderFormError>;

/// Errors that can occur while processing an order request.
#[derive(Debug, Error)]
pub enum OrderFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The customer name is empty after sanitization.
    #[error("customer name cannot be empty")]
    EmptyCustomerName,
    /// The shipping address is empty after sanitization.
    #[error("shipping address cannot be empty")]
    EmptyShippingAddress,
}

/// Request body submitted to place an order.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaceOrderForm {
    #[validate(email, length(max = EMAIL_MAX_LEN_VALIDATOR))]
    pub customer_email: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub customer_name: String,
    #[validate(length(min = 1, max = ADDRESS_MAX_LEN_VALIDATOR))]
    pub shipping_address: String,
    /// Requested lines; at least one is required.
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub order_items: Vec<OrderItemForm>,
}

/// A single requested line of [`PlaceOrderForm`].
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Validate)]
pub struct OrderItemForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl PlaceOrderForm {
    /// Validates and sanitizes the payload into a domain `PlaceOrder`.
    ///
    /// The email is kept verbatim since orders are later looked up by exact
    /// email match.
    pub fn into_place_order(self) -> OrderFormResult<PlaceOrder> {
        self.validate()?;

        let customer_name = sanitize_inline_text(&self.customer_name);
        if customer_name.is_empty() {
            return Err(OrderFormError::EmptyCustomerName);
        }

        let shipping_address = sanitize_inline_text(&self.shipping_address);
        if shipping_address.is_empty() {
            return Err(OrderFormError::EmptyShippingAddress);
        }

        let lines = self
            .order_items
            .iter()
            .map(|item| OrderLine {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect();

        Ok(PlaceOrder {
            customer_email: self.customer_email,
            customer_name,
            shipping_address,
            lines,
        })
    }
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(items: Vec<OrderItemForm>) -> PlaceOrderForm {
        PlaceOrderForm {
            customer_email: "budi@example.com".to_string(),
            customer_name: "  Budi \t Santoso ".to_string(),
            shipping_address: "Jl. Merdeka\n10, Bandung".to_string(),
            order_items: items,
        }
    }

    #[test]
    fn place_order_form_sanitizes_and_converts() {
        let request = form(vec![
            OrderItemForm {
                product_id: 1,
                quantity: 2,
            },
            OrderItemForm {
                product_id: 4,
                quantity: 1,
            },
        ])
        .into_place_order()
        .expect("expected conversion to succeed");

        assert_eq!(request.customer_email, "budi@example.com");
        assert_eq!(request.customer_name, "Budi Santoso");
        assert_eq!(request.shipping_address, "Jl. Merdeka 10, Bandung");
        assert_eq!(
            request.lines,
            vec![
                OrderLine {
                    product_id: 1,
                    quantity: 2
                },
                OrderLine {
                    product_id: 4,
                    quantity: 1
                },
            ]
        );
    }

    #[test]
    fn place_order_form_rejects_empty_items() {
        let result = form(Vec::new()).into_place_order();

        match result {
            Err(OrderFormError::Validation(errors)) => {
                assert!(errors.field_errors().contains_key("order_items"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn place_order_form_rejects_non_positive_quantity() {
        let result = form(vec![OrderItemForm {
            product_id: 1,
            quantity: 0,
        }])
        .into_place_order();

        assert!(matches!(result, Err(OrderFormError::Validation(_))));
    }

    #[test]
    fn place_order_form_rejects_malformed_email() {
        let mut payload = form(vec![OrderItemForm {
            product_id: 1,
            quantity: 1,
        }]);
        payload.customer_email = "not-an-email".to_string();

        let result = payload.into_place_order();

        assert!(matches!(result, Err(OrderFormError::Validation(_))));
    }

    #[test]
    fn place_order_form_rejects_blank_name() {
        let mut payload = form(vec![OrderItemForm {
            product_id: 1,
            quantity: 1,
        }]);
        payload.customer_name = " \t ".to_string();

        let result = payload.into_place_order();

        assert!(matches!(result, Err(OrderFormError::EmptyCustomerName)));
    }

    #[test]
    fn place_order_form_deserializes_api_payload() {
        let payload: PlaceOrderForm = serde_json::from_str(
            r#"{
                "customer_email": "sari@example.com",
                "customer_name": "Sari",
                "shipping_address": "Jl. Asia Afrika 8",
                "order_items": [{"product_id": 3, "quantity": 5}]
            }"#,
        )
        .expect("deserialize payload");

        assert_eq!(payload.order_items.len(), 1);
        assert_eq!(payload.order_items[0].quantity, 5);
    }
}
