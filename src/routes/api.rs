use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::forms::orders::PlaceOrderForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, catalog, orders};

#[get("/")]
pub async fn show_index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Welcome to BiteSwift Catering API" }))
}

#[get("/products")]
/// Return the catalog filtered by `category` and ordered by `sort`.
pub async fn api_list_products(
    params: web::Query<catalog::ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match catalog::list_products(repo.get_ref(), params.into_inner()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(&err, "Failed to list products"),
    }
}

#[post("/orders")]
/// Place an order. Responds `404` for unknown products and `400` for
/// insufficient stock or malformed input.
pub async fn api_place_order(
    form: web::Json<PlaceOrderForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::place_order(repo.get_ref(), form.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response(&err, "Failed to place order"),
    }
}

#[get("/orders")]
/// Return the orders placed with the exact `email`.
pub async fn api_list_orders(
    params: web::Query<orders::OrdersQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::list_orders_by_customer(repo.get_ref(), &params.email) {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(err) => error_response(&err, "Failed to list orders"),
    }
}

#[get("/orders/{order_id}")]
pub async fn api_get_order(
    order_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::get_order(repo.get_ref(), order_id.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response(&err, "Failed to load order"),
    }
}

fn error_response(err: &ServiceError, context: &str) -> HttpResponse {
    let detail = json!({ "detail": err.to_string() });
    match err {
        ServiceError::Validation(_) | ServiceError::InsufficientStock { .. } => {
            HttpResponse::BadRequest().json(detail)
        }
        ServiceError::ProductNotFound(_) | ServiceError::NotFound => {
            HttpResponse::NotFound().json(detail)
        }
        ServiceError::Internal(_) | ServiceError::StoreUnavailable(_) => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().json(json!({ "detail": "internal server error" }))
        }
    }
}
