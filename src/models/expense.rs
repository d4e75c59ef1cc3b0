use super::format;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 原始消费记录; 时间字段可以叫 timestamp 或 date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(alias = "date", with = "format::datetime")]
    pub timestamp: NaiveDateTime,
    #[serde(with = "format::decimal")]
    pub amount: BigDecimal,
}

/// parse 请求体: 裸数组或 {"expenses": [...]}
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ExpenseBatch {
    Wrapped { expenses: Vec<Expense> },
    Bare(Vec<Expense>),
}

impl ExpenseBatch {
    pub fn into_expenses(self) -> Vec<Expense> {
        match self {
            ExpenseBatch::Wrapped { expenses } => expenses,
            ExpenseBatch::Bare(expenses) => expenses,
        }
    }
}
