use crate::error::StoreError;
use crate::models::{AdviceRecord, AdviceRecordInput};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// SQLite-backed store for regime recommendations.
#[derive(Clone)]
pub struct AdviceStore {
    pool: SqlitePool,
}

impl AdviceStore {
    /// Open (or create) the database and run the schema.
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    /// Execute the embedded schema, statement by statement (sqlx does
    /// not run multi-statement strings).
    async fn init_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("../schema.sql");
        for statement in schema.split(';') {
            let stmt = statement.trim();
            if !stmt.is_empty() {
                sqlx::query(stmt).execute(&self.pool).await?;
            }
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Persist one computed recommendation, returning the row id.
    pub async fn save_recommendation(
        &self,
        input: AdviceRecordInput,
    ) -> Result<i64, StoreError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO tax_advice
            (name, email, salary, capital_gains, sec_80c, sec_80d,
             home_loan_interest, multiple_properties, recommended_regime, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.salary)
        .bind(input.capital_gains)
        .bind(input.sec_80c)
        .bind(input.sec_80d)
        .bind(input.home_loan_interest)
        .bind(input.multiple_properties)
        .bind(&input.recommended_regime)
        .bind(chrono::Utc::now().to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Most recent recommendations, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<AdviceRecord>, StoreError> {
        let records = sqlx::query_as::<_, AdviceRecord>(
            r#"
            SELECT * FROM tax_advice
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// All recommendations recorded for an email, newest first.
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<AdviceRecord>, StoreError> {
        let records = sqlx::query_as::<_, AdviceRecord>(
            r#"
            SELECT * FROM tax_advice
            WHERE email = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
