use crate::models::{ClassifiedTransaction, PeriodSet, Transaction};
use bigdecimal::BigDecimal;

/// 计算单笔交易覆盖后的投入金额.
/// q 优先于 p, 同类窗口按输入顺序取第一个命中的.
pub fn adjusted_amount(tx: &Transaction, periods: &PeriodSet) -> BigDecimal {
    if let Some(q) = periods.q.iter().find(|q| q.window.contains(tx.date)) {
        return q.fixed.clone();
    }
    match periods.p.iter().find(|p| p.window.contains(tx.date)) {
        Some(p) => &tx.remanent + &p.extra,
        None => tx.remanent.clone(),
    }
}

pub fn classify(periods: &PeriodSet, transactions: &[Transaction]) -> Vec<ClassifiedTransaction> {
    transactions
        .iter()
        .map(|tx| ClassifiedTransaction {
            transaction: tx.clone(),
            adjusted: adjusted_amount(tx, periods),
            in_k_period: periods.k.iter().any(|k| k.window.contains(tx.date)),
        })
        .collect()
}
