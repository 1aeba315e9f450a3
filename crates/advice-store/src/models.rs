use serde::{Deserialize, Serialize};

/// A persisted recommendation row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdviceRecord {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub salary: f64,
    pub capital_gains: f64,
    pub sec_80c: f64,
    pub sec_80d: f64,
    pub home_loan_interest: f64,
    pub multiple_properties: bool,
    pub recommended_regime: String,
    pub created_at: Option<String>,
}

/// Input for a new recommendation row; the store stamps `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceRecordInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub salary: f64,
    pub capital_gains: f64,
    pub sec_80c: f64,
    pub sec_80d: f64,
    pub home_loan_interest: f64,
    pub multiple_properties: bool,
    pub recommended_regime: String,
}
