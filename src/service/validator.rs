use crate::models::{InvalidTransaction, Transaction, ValidationOutcome};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use indexmap::IndexSet;

pub const DUPLICATE_MESSAGE: &str = "Duplicate transaction";

pub fn exceeds_maximum_message(max_invest: &BigDecimal) -> String {
    format!("Remanent exceeds maximum investment of {max_invest}")
}

/// 按输入顺序逐笔校验, 命中的第一条规则生效:
/// 1. (date, amount) 已有一笔被判为有效 -> 重复
/// 2. 给了 max_invest 且 remanent 超出 -> 超限
///
/// wage 目前只作为上下文参数传入, 不参与判断.
pub fn validate(
    wage: &BigDecimal,
    transactions: &[Transaction],
    max_invest: Option<&BigDecimal>,
) -> ValidationOutcome {
    let mut accepted: IndexSet<(NaiveDateTime, BigDecimal)> = IndexSet::with_capacity(transactions.len());
    let mut outcome = ValidationOutcome::default();

    for tx in transactions {
        let key = tx.key();
        if accepted.contains(&key) {
            tracing::debug!("transaction {} / {} rejected as duplicate", tx.date, tx.amount);
            outcome.invalid.push(InvalidTransaction::new(tx.clone(), DUPLICATE_MESSAGE));
            continue;
        }

        if let Some(cap) = max_invest {
            if tx.remanent > *cap {
                tracing::debug!("transaction {} remanent {} above cap {}", tx.date, tx.remanent, cap);
                outcome
                    .invalid
                    .push(InvalidTransaction::new(tx.clone(), exceeds_maximum_message(cap)));
                continue;
            }
        }

        accepted.insert(key);
        outcome.valid.push(tx.clone());
    }

    tracing::debug!(
        "validated {} transactions for wage {}: {} valid, {} invalid",
        transactions.len(),
        wage,
        outcome.valid.len(),
        outcome.invalid.len()
    );
    outcome
}
