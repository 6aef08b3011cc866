use biteswift_orders::domain::product::{NewProduct, Product};
use biteswift_orders::repository::{DieselRepository, ProductReader};
use biteswift_orders::services::catalog::{self, ProductsQuery};
use chrono::{NaiveDate, NaiveDateTime};

mod common;

fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .expect("valid timestamp")
}

fn seeded_repo(test_db: &common::TestDb) -> DieselRepository {
    let repo = DieselRepository::new(test_db.pool());
    let products = [
        NewProduct::new("Nasi Goreng Spesial", "Paket Harian", 25_000, 50).with_created_at(at(8)),
        NewProduct::new("Brownies Coklat", "Snack", 15_000, 100).with_created_at(at(9)),
        NewProduct::new("Pisang Goreng", "snack", 8_000, 60).with_created_at(at(10)),
        NewProduct::new("Paket Salad Diet", "Paket Diet", 35_000, 30).with_created_at(at(11)),
        NewProduct::new("Ayam Bakar Madu", "Paket Harian", 30_000, 25).with_created_at(at(12)),
    ];
    for product in products {
        common::insert_product(&repo, product);
    }
    repo
}

fn list(repo: &DieselRepository, category: Option<&str>, sort: Option<&str>) -> Vec<Product> {
    catalog::list_products(
        repo,
        ProductsQuery {
            category: category.map(str::to_string),
            sort: sort.map(str::to_string),
        },
    )
    .expect("expected listing to succeed")
}

fn ids(products: &[Product]) -> Vec<i32> {
    products.iter().map(|product| product.id).collect()
}

#[test]
fn category_variants_return_the_same_products() {
    let test_db = common::TestDb::new("catalog_category_variants.db");
    let repo = seeded_repo(&test_db);

    let expected = ids(&list(&repo, Some("Snack"), None));
    assert_eq!(expected.len(), 2);

    for variant in ["snack+", " SNACK ", "%20snack%20", "+Snack+", "sNaCk\t"] {
        assert_eq!(
            ids(&list(&repo, Some(variant), None)),
            expected,
            "variant {variant:?}"
        );
    }

    let harian = list(&repo, Some("paket+harian"), Some("price_asc"));
    assert_eq!(
        harian.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Nasi Goreng Spesial", "Ayam Bakar Madu"]
    );

    assert!(list(&repo, Some("Minuman"), None).is_empty());
}

#[test]
fn non_ascii_categories_match_case_insensitively() {
    let test_db = common::TestDb::new("catalog_non_ascii_category.db");
    let repo = seeded_repo(&test_db);
    let kue = common::insert_product(
        &repo,
        NewProduct::new("Kue Lapis Legit", "KUÉ", 40_000, 12).with_created_at(at(13)),
    );
    let crepe = common::insert_product(
        &repo,
        NewProduct::new("Crêpe Pandan", "Kué", 22_000, 20).with_created_at(at(14)),
    );

    for variant in ["Kué", "KUÉ", "kué+", "%20kUé%20"] {
        assert_eq!(
            ids(&list(&repo, Some(variant), None)),
            vec![crepe, kue],
            "variant {variant:?}"
        );
    }

    assert!(list(&repo, Some("kue"), None).is_empty());
}

#[test]
fn sort_modes_order_the_catalog() {
    let test_db = common::TestDb::new("catalog_sort_modes.db");
    let repo = seeded_repo(&test_db);

    let ascending = list(&repo, None, Some("price_asc"));
    assert_eq!(ascending.len(), 5);
    assert!(ascending.windows(2).all(|pair| pair[0].price <= pair[1].price));

    let descending = list(&repo, None, Some("price_desc"));
    assert!(descending.windows(2).all(|pair| pair[0].price >= pair[1].price));

    for sort in [None, Some("newest"), Some("")] {
        let newest = list(&repo, None, sort);
        assert!(
            newest
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at)
        );
        assert_eq!(newest[0].name, "Ayam Bakar Madu");
    }
}

#[test]
fn seed_catalog_runs_once() {
    let test_db = common::TestDb::new("catalog_seed_once.db");
    let repo = DieselRepository::new(test_db.pool());

    assert_eq!(catalog::seed_catalog(&repo).unwrap(), 5);
    assert_eq!(catalog::seed_catalog(&repo).unwrap(), 0);
    assert_eq!(repo.count_products().unwrap(), 5);

    let snacks = list(&repo, Some("snack"), None);
    assert_eq!(snacks.len(), 1);
    assert_eq!(snacks[0].name, "Brownies Coklat");
    assert_eq!(snacks[0].stock, 100);
}
