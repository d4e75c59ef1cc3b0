use super::projector::{self, ModelKind, ProjectionInput};
use super::{aggregator, classifier, rounder, validator};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{
    Expense, FilterReport, PeriodSet, ReturnsReport, Transaction, ValidationOutcome,
};
use bigdecimal::{BigDecimal, ToPrimitive, Zero};

/// 收益测算的请求上下文
#[derive(Debug, Clone)]
pub struct ProjectionParams {
    pub age: u32,
    pub wage: BigDecimal,
    pub inflation: f64,
    pub max_invest: Option<BigDecimal>,
}

/// 对外的四个操作: parse / validate / classify_and_aggregate / project.
/// 无内部状态, 可被任意多个请求并发共享.
pub struct SavingsService {
    config: EngineConfig,
    rounding_unit: BigDecimal,
}

impl SavingsService {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let rounding_unit = BigDecimal::from(config.rounding_unit);
        Ok(Self {
            config,
            rounding_unit,
        })
    }

    /// 消费记录 -> 取整交易
    pub fn parse(&self, expenses: &[Expense]) -> Result<Vec<Transaction>, EngineError> {
        if let Some(bad) = expenses.iter().find(|e| e.amount < BigDecimal::zero()) {
            return Err(EngineError::NegativeAmount(bad.timestamp));
        }

        let transactions = rounder::round(expenses, &self.rounding_unit);
        tracing::info!("parsed {} expenses into transactions", transactions.len());
        Ok(transactions)
    }

    pub fn validate(
        &self,
        wage: &BigDecimal,
        transactions: &[Transaction],
        max_invest: Option<&BigDecimal>,
    ) -> Result<ValidationOutcome, EngineError> {
        check_inputs(wage, transactions, max_invest)?;

        let outcome = validator::validate(wage, transactions, max_invest);
        tracing::info!(
            "validated {} transactions: {} valid, {} invalid",
            transactions.len(),
            outcome.valid.len(),
            outcome.invalid.len()
        );
        Ok(outcome)
    }

    /// 校验 -> q/p 覆盖 -> k 分桶
    pub fn classify_and_aggregate(
        &self,
        periods: &PeriodSet,
        wage: &BigDecimal,
        transactions: &[Transaction],
        max_invest: Option<&BigDecimal>,
    ) -> Result<FilterReport, EngineError> {
        check_inputs(wage, transactions, max_invest)?;

        let outcome = validator::validate(wage, transactions, max_invest);
        let classified = classifier::classify(periods, &outcome.valid);
        let buckets = aggregator::aggregate(&periods.k, &classified);

        tracing::info!(
            "filtered {} transactions: {} valid, {} invalid, {} buckets",
            transactions.len(),
            classified.len(),
            outcome.invalid.len(),
            buckets.len()
        );
        Ok(FilterReport {
            valid: classified,
            invalid: outcome.invalid,
            savings_by_dates: buckets,
        })
    }

    /// 在分桶结果上按所选模型测算收益与税收优惠
    pub fn project(
        &self,
        params: &ProjectionParams,
        periods: &PeriodSet,
        transactions: &[Transaction],
        kind: ModelKind,
    ) -> Result<ReturnsReport, EngineError> {
        if params.inflation < 0.0 || !params.inflation.is_finite() {
            return Err(EngineError::NegativeInput("inflation"));
        }
        let report = self.classify_and_aggregate(
            periods,
            &params.wage,
            transactions,
            params.max_invest.as_ref(),
        )?;

        let inflation = projector::normalize_inflation(params.inflation);
        let annual_income = params.wage.to_f64().unwrap_or(0.0) * f64::from(self.config.wage_periods_per_year);
        let model = projector::model_for(kind, &self.config);

        let mut buckets = report.savings_by_dates;
        for bucket in &mut buckets {
            let projection = model.project(&ProjectionInput {
                principal: &bucket.amount,
                age: params.age,
                annual_income,
                years: projector::horizon_years(&self.config.horizon, params.age, &bucket.window),
                inflation,
            });
            bucket.profits = Some(projection.profits);
            bucket.tax_benefit = Some(projection.tax_benefit);
        }

        let valid = report.valid.iter().map(|c| &c.transaction);
        let (total_amount, total_ceiling) = valid.fold(
            (BigDecimal::zero(), BigDecimal::zero()),
            |(amount, ceiling), tx| (amount + &tx.amount, ceiling + &tx.ceiling),
        );

        tracing::info!(
            "projected {} buckets with {:?} model for age {}",
            buckets.len(),
            kind,
            params.age
        );
        Ok(ReturnsReport {
            transactions_total_amount: total_amount,
            transactions_total_ceiling: total_ceiling,
            savings_by_dates: buckets,
        })
    }
}

fn check_inputs(
    wage: &BigDecimal,
    transactions: &[Transaction],
    max_invest: Option<&BigDecimal>,
) -> Result<(), EngineError> {
    if *wage < BigDecimal::zero() {
        return Err(EngineError::NegativeInput("wage"));
    }
    if max_invest.is_some_and(|cap| *cap < BigDecimal::zero()) {
        return Err(EngineError::NegativeInput("maxInvest"));
    }
    transactions.iter().try_for_each(Transaction::check)
}
