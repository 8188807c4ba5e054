use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::errors::PersistenceError;

/// A positional parameter. Values are always bound, never spliced into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Date(NaiveDate),
}

/// A statement template using `$1..$n` placeholders plus its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: &'static str,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: &'static str, params: Vec<SqlValue>) -> Self {
        Statement { sql, params }
    }

    /// First keyword of the template, e.g. `INSERT`.
    pub fn verb(&self) -> &str {
        self.sql.split_whitespace().next().unwrap_or("")
    }
}

/// Executes single statements. The error carries no structure the caller relies on.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Returns the number of affected rows.
    async fn execute(&self, statement: &Statement) -> Result<u64, PersistenceError>;
}

#[derive(Clone)]
pub struct PgPersistence {
    pool: PgPool,
}

impl PgPersistence {
    pub fn new(pool: PgPool) -> Self {
        PgPersistence { pool }
    }
}

#[async_trait]
impl Persistence for PgPersistence {
    async fn execute(&self, statement: &Statement) -> Result<u64, PersistenceError> {
        let mut query = sqlx::query(statement.sql);

        for param in &statement.params {
            query = match param {
                SqlValue::Text(value) => query.bind(value.clone()),
                SqlValue::Int(value) => query.bind(*value),
                SqlValue::Date(value) => query.bind(*value),
            };
        }

        let result = query.execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}

/// Keeps every executed statement in memory, for exercising actions without Postgres.
///
/// A `failing` instance records the statement and then returns an error.
#[derive(Clone, Default)]
pub struct RecordingPersistence {
    statements: Arc<Mutex<Vec<Statement>>>,
    failing: bool,
}

impl RecordingPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        RecordingPersistence {
            statements: Arc::new(Mutex::new(Vec::new())),
            failing: true,
        }
    }

    pub fn statements(&self) -> Vec<Statement> {
        match self.statements.lock() {
            Ok(statements) => statements.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl Persistence for RecordingPersistence {
    async fn execute(&self, statement: &Statement) -> Result<u64, PersistenceError> {
        self.statements
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?
            .push(statement.clone());

        if self.failing {
            return Err(PersistenceError::Unavailable(
                "connection refused".to_string(),
            ));
        }

        Ok(1)
    }
}
