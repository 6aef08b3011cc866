//! Helpers for integration tests.

use std::path::{Path, PathBuf};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use biteswift_orders::db::{DbPool, establish_connection_pool};
use biteswift_orders::domain::product::NewProduct;
use biteswift_orders::repository::{DieselRepository, ProductWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    path: PathBuf,
    pool: Option<DbPool>,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("Temporary path is not valid UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb {
            path,
            pool: Some(pool),
            _dir: dir,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone().expect("pool is alive until drop")
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        self.pool.take();
        std::fs::remove_file(&self.path).ok();
    }
}

/// Insert a product and return its identifier.
#[allow(dead_code)]
pub fn insert_product(repo: &DieselRepository, product: NewProduct) -> i32 {
    repo.create_product(&product)
        .expect("Failed to insert product.")
        .id
}
