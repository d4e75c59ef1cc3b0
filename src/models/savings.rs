use super::format;
use super::period::Window;
use super::transaction::{ClassifiedTransaction, InvalidTransaction};
use bigdecimal::BigDecimal;
use serde::Serialize;

/// 单个 k 窗口的汇总; profits/taxBenefit 只在收益测算时填充
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsBucket {
    #[serde(flatten)]
    pub window: Window,
    #[serde(with = "format::decimal")]
    pub amount: BigDecimal,
    #[serde(with = "format::decimal::option", skip_serializing_if = "Option::is_none")]
    pub profits: Option<BigDecimal>,
    #[serde(with = "format::decimal::option", skip_serializing_if = "Option::is_none")]
    pub tax_benefit: Option<BigDecimal>,
}

impl SavingsBucket {
    pub fn new(window: Window, amount: BigDecimal) -> Self {
        Self {
            window,
            amount,
            profits: None,
            tax_benefit: None,
        }
    }
}

/// classifyAndAggregate 的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterReport {
    pub valid: Vec<ClassifiedTransaction>,
    pub invalid: Vec<InvalidTransaction>,
    pub savings_by_dates: Vec<SavingsBucket>,
}

/// project 的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsReport {
    #[serde(with = "format::decimal")]
    pub transactions_total_amount: BigDecimal,
    #[serde(with = "format::decimal")]
    pub transactions_total_ceiling: BigDecimal,
    pub savings_by_dates: Vec<SavingsBucket>,
}
