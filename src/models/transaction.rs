use super::format;
use crate::error::EngineError;
use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 取整后的交易; ceiling = amount + remanent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(with = "format::datetime")]
    pub date: NaiveDateTime,
    #[serde(with = "format::decimal")]
    pub amount: BigDecimal,
    #[serde(with = "format::decimal")]
    pub ceiling: BigDecimal,
    #[serde(with = "format::decimal")]
    pub remanent: BigDecimal,
}

impl Transaction {
    /// 去重键 (date, amount); 金额先规范化, 使 250 与 250.0 视为同一笔
    pub fn key(&self) -> (NaiveDateTime, BigDecimal) {
        (self.date, self.amount.normalized())
    }

    /// 客户端回传的交易需要重新满足取整不变式.
    /// 非整数金额按 f64 输出, 回传后允许 ceiling 量级的相对误差 1e-12.
    pub fn check(&self) -> Result<(), EngineError> {
        let drift = (&self.ceiling - &self.amount - &self.remanent).abs();
        let consistent = self.amount >= BigDecimal::zero()
            && self.remanent >= BigDecimal::zero()
            && drift <= round_trip_tolerance(&self.ceiling);
        if consistent {
            Ok(())
        } else {
            Err(EngineError::InconsistentTransaction(self.date))
        }
    }
}

fn round_trip_tolerance(ceiling: &BigDecimal) -> BigDecimal {
    let magnitude = ceiling.abs().max(BigDecimal::from(1));
    magnitude / BigDecimal::from(1_000_000_000_000i64)
}

/// 被拒绝的交易及原因
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub message: String,
}

impl InvalidTransaction {
    pub fn new(transaction: Transaction, message: impl Into<String>) -> Self {
        Self {
            transaction,
            message: message.into(),
        }
    }
}

/// 校验结果: 两个列表都保持输入顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub valid: Vec<Transaction>,
    pub invalid: Vec<InvalidTransaction>,
}

/// 经过 q/p 覆盖规则后的交易
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(skip)]
    pub adjusted: BigDecimal,
    #[serde(rename = "inKPeriod")]
    pub in_k_period: bool,
}
