use entity::prelude::*;
use migration::CREATE_PENDING_APPLICATION_INDEX;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Tables are generated from SeaORM entities. Constraints that cannot be expressed on an
/// entity (such as partial indexes) are added as raw statements executed after the tables.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::User;
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements, executed in insertion order.
    tables: Vec<TableCreateStatement>,
    /// Raw SQL statements executed after every table exists.
    statements: Vec<String>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            statements: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables with foreign keys must be added after the tables they reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds a raw SQL statement run once all tables are created.
    ///
    /// # Arguments
    /// - `sql` - Statement to execute verbatim
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_statement(mut self, sql: impl Into<String>) -> Self {
        self.statements.push(sql.into());
        self
    }

    /// Adds every table used by the RP application workflow.
    ///
    /// Creates `user`, `rp_application` and `verification_code`, plus the partial unique
    /// index permitting a single pending application per owner, matching the migrated
    /// production schema.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_rp_tables(self) -> Self {
        self.with_table(User)
            .with_table(RpApplication)
            .with_table(VerificationCode)
            .with_statement(CREATE_PENDING_APPLICATION_INDEX)
    }

    /// Builds the test context, creating all configured tables and statements.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with the schema in place
    /// - `Err(TestError::Database)` - Failed to connect or to create the schema
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_statements(self.statements).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
