use chrono::NaiveDateTime;
use thiserror::Error;

/// 结构性错误: 请求本身不合法, 整个调用失败.
/// 重复/超限等业务拒绝不走这里, 而是放进 invalid 列表.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("period end {end} is before start {start}")]
    InvertedPeriod {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("expense at {0} has a negative amount")]
    NegativeAmount(NaiveDateTime),
    #[error("transaction at {0} violates ceiling = amount + remanent with remanent >= 0")]
    InconsistentTransaction(NaiveDateTime),
    #[error("{0} must not be negative")]
    NegativeInput(&'static str),
    #[error("invalid engine configuration: {0}")]
    Config(String),
}
