//! Regime comparison and deduction-suggestion routes.

use advice_store::{AdviceRecord, AdviceRecordInput};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tax_engine::{
    AdviceOutcome, RegimeComparator, RegimeRecommendation, SuggestionEngine, TaxInput,
};

use crate::{ApiResponse, AppError, AppState};

/// Advisory request body: the taxpayer's financial profile plus an
/// optional self-reported identity, used only for persistence.
#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub input: TaxInput,
}

/// Query for stored recommendations.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub email: Option<String>,
    pub limit: Option<i64>,
}

pub fn tax_routes() -> Router<AppState> {
    Router::new()
        .route("/api/regime", post(recommend_regime))
        .route("/api/tax/suggestions", post(tax_suggestions))
        .route("/api/advice/recent", get(recent_advice))
}

/// Compare both regimes and recommend the cheaper one. When a store is
/// configured the result is persisted fire-and-forget; a failed save is
/// logged and never alters the response.
async fn recommend_regime(
    State(state): State<AppState>,
    Json(request): Json<AdviceRequest>,
) -> Json<ApiResponse<RegimeRecommendation>> {
    let recommendation = RegimeComparator::new().recommend(&request.input);

    if let Some(store) = state.store.clone() {
        let record = to_record(&request, &recommendation.regime);
        tokio::spawn(async move {
            if let Err(err) = store.save_recommendation(record).await {
                tracing::warn!("failed to persist recommendation: {err}");
            }
        });
    }

    Json(ApiResponse::success(recommendation))
}

/// Old-regime deduction suggestions. New-regime callers get the fixed
/// not-applicable notice inside the same envelope, with HTTP 200.
async fn tax_suggestions(
    Json(request): Json<AdviceRequest>,
) -> Json<ApiResponse<AdviceOutcome>> {
    let outcome = SuggestionEngine::new().advise(&request.input);
    Json(ApiResponse::success(outcome))
}

/// Stored recommendations, newest first; filtered by email when given.
async fn recent_advice(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<ApiResponse<Vec<AdviceRecord>>>, AppError> {
    let store = state
        .store
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("persistence is not configured"))?;

    let records = match query.email {
        Some(email) => store.find_by_email(&email).await?,
        None => store.recent(query.limit.unwrap_or(20)).await?,
    };

    Ok(Json(ApiResponse::success(records)))
}

fn to_record(request: &AdviceRequest, regime: &str) -> AdviceRecordInput {
    AdviceRecordInput {
        name: request.name.clone(),
        email: request.email.clone(),
        salary: request.input.salary,
        capital_gains: request.input.capital_gains,
        sec_80c: request.input.deductions_80c,
        sec_80d: request.input.deductions_80d,
        home_loan_interest: request.input.home_loan_interest,
        multiple_properties: request.input.multiple_properties,
        recommended_regime: regime.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_original_wire_format() {
        // Shape sent by the legacy frontend: numbers as strings,
        // "yes"/"no" booleans, camelCase keys.
        let request: AdviceRequest = serde_json::from_str(
            r#"{
                "name": "Asha",
                "email": "asha@example.com",
                "salary": "1200000",
                "capitalGains": "0",
                "sec80c": "50000",
                "sec80d": "",
                "homeLoan": "0",
                "multipleHouse": "no",
                "age": "30",
                "tax_regime": "old"
            }"#,
        )
        .unwrap();

        assert_eq!(request.name.as_deref(), Some("Asha"));
        assert!((request.input.salary - 1_200_000.0).abs() < 0.01);
        assert!((request.input.deductions_80c - 50_000.0).abs() < 0.01);
        assert_eq!(request.input.deductions_80d, 0.0);
        assert!(!request.input.multiple_properties);
        assert_eq!(request.input.age, 30);
    }

    #[test]
    fn test_request_identity_is_optional() {
        let request: AdviceRequest =
            serde_json::from_str(r#"{"salary": 800000}"#).unwrap();
        assert!(request.name.is_none());
        assert!(request.email.is_none());
        assert!((request.input.salary - 800_000.0).abs() < 0.01);
    }

    #[test]
    fn test_to_record_maps_profile_fields() {
        let request: AdviceRequest = serde_json::from_str(
            r#"{
                "email": "asha@example.com",
                "salary": 900000,
                "sec80c": 120000,
                "homeLoan": 150000,
                "multipleHouse": "yes"
            }"#,
        )
        .unwrap();
        let record = to_record(&request, "Old Regime");

        assert_eq!(record.email.as_deref(), Some("asha@example.com"));
        assert!((record.salary - 900_000.0).abs() < 0.01);
        assert!((record.sec_80c - 120_000.0).abs() < 0.01);
        assert!((record.home_loan_interest - 150_000.0).abs() < 0.01);
        assert!(record.multiple_properties);
        assert_eq!(record.recommended_regime, "Old Regime");
    }

    #[tokio::test]
    async fn test_recommend_regime_without_store() {
        let state = AppState { store: None };
        let request: AdviceRequest =
            serde_json::from_str(r#"{"salary": 1200000}"#).unwrap();

        let Json(response) = recommend_regime(State(state), Json(request)).await;
        assert!(response.success);
        let recommendation = response.data.unwrap();
        assert_eq!(recommendation.regime, "New Regime");
        assert!((recommendation.new_tax - 85_800.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_suggestions_new_regime_notice_in_envelope() {
        let request: AdviceRequest =
            serde_json::from_str(r#"{"tax_regime": "new"}"#).unwrap();
        let Json(response) = tax_suggestions(Json(request)).await;
        assert!(response.success);

        let value = serde_json::to_value(response.data.unwrap()).unwrap();
        assert_eq!(value["error"], serde_json::json!(true));
        assert!(value["message"].is_string());
    }

    #[tokio::test]
    async fn test_recent_advice_requires_store() {
        let state = AppState { store: None };
        let result = recent_advice(
            State(state),
            Query(RecentQuery {
                email: None,
                limit: None,
            }),
        )
        .await;
        assert!(result.is_err());
    }
}
