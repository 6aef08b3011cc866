use diesel::prelude::*;

use crate::{
    db::unicode_lower,
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery, SortMode,
    },
    models::product::{NewProduct as DbNewProduct, Product as DbProduct},
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category) = query.category.as_ref() {
            items = items.filter(unicode_lower(products::category).eq(category));
        }

        // Ties fall back to insertion order.
        items = match query.sort {
            SortMode::PriceAsc => items.order((products::price.asc(), products::id.asc())),
            SortMode::PriceDesc => items.order((products::price.desc(), products::id.asc())),
            SortMode::Newest => items.order((products::created_at.desc(), products::id.asc())),
        };

        let db_products = items.load::<DbProduct>(&mut conn)?;

        Ok(db_products.into_iter().map(Into::into).collect())
    }

    fn count_products(&self) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let total = products::table.count().get_result::<i64>(&mut conn)?;

        Ok(total as usize)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn create_products(&self, new_products: &[DomainNewProduct]) -> RepositoryResult<usize> {
        use crate::schema::products;

        if new_products.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let payload: Vec<DbNewProduct> = new_products.iter().map(DbNewProduct::from).collect();

        let inserted = diesel::insert_into(products::table)
            .values(&payload)
            .execute(&mut conn)?;

        Ok(inserted)
    }
}
