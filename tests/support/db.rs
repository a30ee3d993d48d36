/// Postgres fixtures for repository tests
///
/// Tests using these are `#[ignore]`d and need `TEST_DATABASE_URL`.
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use diesel::prelude::*;
use watchlog_lib::shared::Database;

static DATABASE: OnceLock<Arc<Database>> = OnceLock::new();

/// Get or create the shared test database, migrated once
pub fn test_database() -> Arc<Database> {
    DATABASE
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            let url = std::env::var("TEST_DATABASE_URL")
                .expect("TEST_DATABASE_URL must be set for database tests");
            let database = Database::connect(&url).expect("Failed to create test database pool");
            database
                .run_migrations()
                .expect("Failed to run migrations on test database");
            Arc::new(database)
        })
        .clone()
}

/// Clean all tables - use at the start of each test
pub fn clean_test_db() {
    let database = test_database();
    let mut conn = database.get_connection().expect("Failed to get DB connection");

    diesel::sql_query("TRUNCATE TABLE episode_records, tracked_shows, reviews CASCADE")
        .execute(&mut conn)
        .expect("Failed to clean tables");
}

static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Serialize database tests; the guard releases the lock when dropped
pub fn acquire_test_lock() -> MutexGuard<'static, ()> {
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
