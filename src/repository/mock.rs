use mockall::mock;

use super::{OrderReader, OrderStore, ProductReader, ProductWriter, RepositoryResult};
use crate::domain::{
    order::{NewOrder, NewOrderItem, Order, OrderItem, OrderListQuery},
    product::{NewProduct, Product, ProductListQuery},
};

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<Vec<Product>>;
        fn count_products(&self) -> RepositoryResult<usize>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: &OrderListQuery) -> RepositoryResult<Vec<Order>>;
    }
}

mock! {
    pub OrderStore {}

    impl OrderStore for OrderStore {
        fn find_product_for_update(&mut self, id: i32) -> RepositoryResult<Option<Product>>;
        fn insert_order(&mut self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn insert_order_item(
            &mut self,
            order_id: i32,
            item: &NewOrderItem,
        ) -> RepositoryResult<OrderItem>;
        fn decrement_stock(&mut self, product_id: i32, quantity: i32) -> RepositoryResult<bool>;
    }
}
