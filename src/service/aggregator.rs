use crate::models::{ClassifiedTransaction, ReportPeriod, SavingsBucket};
use bigdecimal::{BigDecimal, Zero};

/// 每个 k 窗口独立求和; 窗口重叠时同一笔交易会计入多个桶
pub fn aggregate(k_periods: &[ReportPeriod], classified: &[ClassifiedTransaction]) -> Vec<SavingsBucket> {
    k_periods
        .iter()
        .map(|period| {
            let window = period.window;
            let amount = classified
                .iter()
                .filter(|c| window.contains(c.transaction.date))
                .fold(BigDecimal::zero(), |acc, c| acc + &c.adjusted);
            SavingsBucket::new(window, amount)
        })
        .collect()
}
