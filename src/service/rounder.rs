use crate::models::{Expense, Transaction};
use bigdecimal::{BigDecimal, Zero};

/// 向上取整到 unit 的整数倍; 本身已是整数倍时保持不变
pub fn round_up(expense: &Expense, unit: &BigDecimal) -> Transaction {
    let residue = &expense.amount % unit;
    let ceiling = if residue.is_zero() {
        expense.amount.clone()
    } else {
        &expense.amount - &residue + unit
    };
    let remanent = &ceiling - &expense.amount;

    Transaction {
        date: expense.timestamp,
        amount: expense.amount.clone(),
        ceiling,
        remanent,
    }
}

/// 一对一, 保持顺序
pub fn round(expenses: &[Expense], unit: &BigDecimal) -> Vec<Transaction> {
    expenses.iter().map(|e| round_up(e, unit)).collect()
}
