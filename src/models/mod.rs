pub mod expense;
pub mod format;
pub mod period;
pub mod savings;
pub mod transaction;

pub use expense::{Expense, ExpenseBatch};
pub use period::{
    ExtraPeriod, ExtraPeriodSpec, FixedPeriod, FixedPeriodSpec, PeriodSet, ReportPeriod,
    ReportPeriodSpec, Window,
};
pub use savings::{FilterReport, ReturnsReport, SavingsBucket};
pub use transaction::{ClassifiedTransaction, InvalidTransaction, Transaction, ValidationOutcome};
