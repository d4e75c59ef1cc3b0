use super::error::ApiError;
use super::telemetry::{self, PerformanceReport};
use super::AppState;
use crate::models::{
    format, ExpenseBatch, ExtraPeriodSpec, FilterReport, FixedPeriodSpec, PeriodSet,
    ReportPeriodSpec, ReturnsReport, Transaction, ValidationOutcome,
};
use crate::service::{ModelKind, ProjectionParams};
use axum::extract::{rejection::JsonRejection, Json, State};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde_json::{json, Value};

/// 请求体: 校验
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(with = "format::decimal")]
    pub wage: BigDecimal,
    pub transactions: Vec<Transaction>,
    #[serde(default, with = "format::decimal::option")]
    pub max_invest: Option<BigDecimal>,
}

/// 请求体: 按时间窗口筛选汇总
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default)]
    pub q: Vec<FixedPeriodSpec>,
    #[serde(default)]
    pub p: Vec<ExtraPeriodSpec>,
    #[serde(default)]
    pub k: Vec<ReportPeriodSpec>,
    pub transactions: Vec<Transaction>,
    #[serde(default, with = "format::decimal")]
    pub wage: BigDecimal,
    #[serde(default, with = "format::decimal::option")]
    pub max_invest: Option<BigDecimal>,
}

/// 请求体: 收益测算 (nps / index 共用)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsRequest {
    pub age: u32,
    #[serde(with = "format::decimal")]
    pub wage: BigDecimal,
    pub inflation: f64,
    #[serde(default)]
    pub q: Vec<FixedPeriodSpec>,
    #[serde(default)]
    pub p: Vec<ExtraPeriodSpec>,
    #[serde(default)]
    pub k: Vec<ReportPeriodSpec>,
    pub transactions: Vec<Transaction>,
    #[serde(default, with = "format::decimal::option")]
    pub max_invest: Option<BigDecimal>,
}

/// 健康检查
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 消费记录取整
pub async fn parse_transactions(
    State(state): State<AppState>,
    payload: Result<Json<ExpenseBatch>, JsonRejection>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let Json(batch) = payload?;
    let transactions = state.service.parse(&batch.into_expenses())?;
    Ok(Json(transactions))
}

/// 重复 / 超限校验
pub async fn validate_transactions(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidationOutcome>, ApiError> {
    let Json(req) = payload?;
    let outcome = state
        .service
        .validate(&req.wage, &req.transactions, req.max_invest.as_ref())?;
    Ok(Json(outcome))
}

/// q/p 覆盖 + k 分桶
pub async fn filter_transactions(
    State(state): State<AppState>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<FilterReport>, ApiError> {
    let Json(req) = payload?;
    let periods = PeriodSet::from_specs(req.q, req.p, req.k)?;
    let report = state.service.classify_and_aggregate(
        &periods,
        &req.wage,
        &req.transactions,
        req.max_invest.as_ref(),
    )?;
    Ok(Json(report))
}

pub async fn returns_nps(
    State(state): State<AppState>,
    payload: Result<Json<ReturnsRequest>, JsonRejection>,
) -> Result<Json<ReturnsReport>, ApiError> {
    project_returns(&state, payload, ModelKind::Nps)
}

pub async fn returns_index(
    State(state): State<AppState>,
    payload: Result<Json<ReturnsRequest>, JsonRejection>,
) -> Result<Json<ReturnsReport>, ApiError> {
    project_returns(&state, payload, ModelKind::Index)
}

fn project_returns(
    state: &AppState,
    payload: Result<Json<ReturnsRequest>, JsonRejection>,
    kind: ModelKind,
) -> Result<Json<ReturnsReport>, ApiError> {
    let Json(req) = payload?;
    let periods = PeriodSet::from_specs(req.q, req.p, req.k)?;
    let params = ProjectionParams {
        age: req.age,
        wage: req.wage,
        inflation: req.inflation,
        max_invest: req.max_invest,
    };
    let report = state
        .service
        .project(&params, &periods, &req.transactions, kind)?;
    Ok(Json(report))
}

/// 进程运行时间 / 内存 / 线程数
pub async fn performance(State(state): State<AppState>) -> Json<PerformanceReport> {
    Json(telemetry::snapshot(state.started_at.elapsed()))
}
