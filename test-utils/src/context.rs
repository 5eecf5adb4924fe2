use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Test environment holding an in-memory database and a session backed by it.
///
/// Both are created lazily on first access and live as long as the context.
pub struct TestContext {
    /// Connection to the in-memory SQLite database, once initialised.
    pub db: Option<DatabaseConnection>,

    /// Session stored in the same in-memory database, once initialised.
    pub session: Option<Session>,
}

impl TestContext {
    /// Creates a context with neither database nor session initialised.
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Gets or creates the in-memory SQLite database connection.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Reference to the database connection
    /// - `Err(TestError::Database)` - Failed to connect to in-memory SQLite database
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let db = Database::connect("sqlite::memory:").await?;

                let db_ref = self.db.insert(db);

                Ok(&*db_ref)
            }
        }
    }

    /// Executes each CREATE TABLE statement in order.
    ///
    /// Typically called by `TestBuilder::build()`.
    ///
    /// # Arguments
    /// - `stmts` - CREATE TABLE statements to execute
    ///
    /// # Returns
    /// - `Ok(())` - All tables created
    /// - `Err(TestError::Database)` - Failed to create one or more tables
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Executes raw SQL statements in order.
    ///
    /// # Arguments
    /// - `stmts` - SQL statements to run unprepared
    ///
    /// # Returns
    /// - `Ok(())` - All statements executed
    /// - `Err(TestError::Database)` - A statement failed
    pub async fn with_statements(&mut self, stmts: Vec<String>) -> Result<(), TestError> {
        let db = self.database().await?;

        for sql in stmts {
            db.execute_unprepared(&sql).await?;
        }

        Ok(())
    }

    /// Gets or creates the test session.
    ///
    /// On first call the database is initialised, the session table is migrated and a
    /// fresh session with a seven day inactivity expiry is created. Later calls return the
    /// same session.
    ///
    /// # Returns
    /// - `Ok(&Session)` - Reference to the session instance
    /// - `Err(TestError)` - Failed to initialise the database or the session table
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        match self.session {
            Some(ref session) => Ok(session),
            None => {
                let db = self.database().await?;

                let pool = db.get_sqlite_connection_pool();
                let session_store = SqliteStore::new(pool.clone());

                session_store
                    .migrate()
                    .await
                    .map_err(|e| TestError::Session(e.to_string()))?;

                let session = Session::new(
                    None,
                    Arc::new(session_store),
                    Some(Expiry::OnInactivity(Duration::days(7))),
                );

                let session_ref = self.session.insert(session);

                Ok(&*session_ref)
            }
        }
    }

    /// Initialises both database and session and returns references to each.
    ///
    /// Avoids overlapping mutable borrows from calling `database()` and `session()`
    /// separately.
    ///
    /// # Returns
    /// - `Ok((&DatabaseConnection, &Session))` - References to both
    /// - `Err(TestError)` - Failed to initialise either
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.database().await?;
        self.session().await?;

        match (self.db.as_ref(), self.session.as_ref()) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => Err(TestError::Session(
                "test context failed to retain database or session".to_string(),
            )),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
